use contracts::shared::rpc::{method_url, RpcResponse};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::shared::config::ErpConfig;

#[derive(Debug, Error)]
pub enum ErpError {
    /// Документ или метод не найден (HTTP 404 / DoesNotExistError)
    #[error("{0} not found")]
    NotFound(String),
    /// ERP вернула ошибку; текст передаётся пользователю как есть
    #[error("{message}")]
    Remote { status: u16, message: String },
    #[error("Сетевая ошибка при запросе {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Ошибка парсинга ответа от {url}: {reason}")]
    Parse { url: String, reason: String },
    #[error("ERP client is not initialized")]
    NotInitialized,
}

/// Ответ REST-списка: `{data: [...]}`
#[derive(Debug, Deserialize)]
struct ResourceList {
    #[serde(default)]
    data: Vec<Value>,
}

/// HTTP-клиент для работы с API ERP
pub struct ErpClient {
    client: reqwest::Client,
    base_url: String,
    auth: Option<String>,
}

impl ErpClient {
    pub fn new(config: &ErpConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .no_proxy()
            .build()
            .map_err(|e| anyhow::anyhow!("Не удалось создать HTTP-клиент: {}", e))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth: config.auth_header(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Абсолютный URL для пути и строки запроса, как их прислал браузер
    pub fn absolute_url(&self, path: &str, query: Option<&str>) -> String {
        match query {
            Some(q) if !q.is_empty() => format!("{}{}?{}", self.base_url, path, q),
            _ => format!("{}{}", self.base_url, path),
        }
    }

    /// POST /api/method/<method>, возвращает `message`
    pub async fn call_method(&self, method: &str, args: &Value) -> Result<Value, ErpError> {
        let url = self.absolute_url(&method_url(method), None);
        tracing::info!("ERP: POST {}", url);

        let request = self.authorized(self.client.post(&url)).json(args);
        let body = self.send(&url, request).await?;

        let envelope: RpcResponse<Value> = serde_json::from_value(body).map_err(|e| ErpError::Parse {
            url: url.clone(),
            reason: e.to_string(),
        })?;
        envelope.into_result().map_err(|message| ErpError::Remote {
            status: 200,
            message,
        })
    }

    /// GET /api/resource/<doctype> со всеми подходящими записями
    pub async fn get_list(
        &self,
        doctype: &str,
        filters: &Value,
        fields: &[&str],
    ) -> Result<Vec<Value>, ErpError> {
        let url = format!(
            "{}/api/resource/{}?filters={}&fields={}&limit_page_length=0",
            self.base_url,
            urlencoding::encode(doctype),
            urlencoding::encode(&filters.to_string()),
            urlencoding::encode(&serde_json::json!(fields).to_string()),
        );
        tracing::info!("ERP: GET list {} filters={}", doctype, filters);

        let body = self.send(&url, self.authorized(self.client.get(&url))).await?;
        let list: ResourceList = serde_json::from_value(body).map_err(|e| ErpError::Parse {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        tracing::info!("ERP: got {} {} records", list.data.len(), doctype);
        Ok(list.data)
    }

    /// PUT /api/resource/<doctype>/<name>
    pub async fn set_value(&self, doctype: &str, name: &str, values: &Value) -> Result<(), ErpError> {
        let url = format!(
            "{}/api/resource/{}/{}",
            self.base_url,
            urlencoding::encode(doctype),
            urlencoding::encode(name)
        );
        let request = self.authorized(self.client.put(&url)).json(values);

        match self.send(&url, request).await {
            Err(ErpError::NotFound(_)) => Err(ErpError::NotFound(format!("{} {}", doctype, name))),
            other => other.map(|_| ()),
        }
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let request = request.header("Accept", "application/json");
        match &self.auth {
            Some(token) => request.header("Authorization", token),
            None => request,
        }
    }

    async fn send(&self, url: &str, request: reqwest::RequestBuilder) -> Result<Value, ErpError> {
        let response = request.send().await.map_err(|source| ErpError::Network {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|source| ErpError::Network {
            url: url.to_string(),
            source,
        })?;

        if status.is_success() {
            return serde_json::from_str(&text).map_err(|e| ErpError::Parse {
                url: url.to_string(),
                reason: e.to_string(),
            });
        }

        tracing::warn!("ERP response: {} for {}", status, url);
        let message = remote_message(&text);
        if status.as_u16() == 404 || message_is_not_found(&text) {
            return Err(ErpError::NotFound(message));
        }
        Err(ErpError::Remote {
            status: status.as_u16(),
            message,
        })
    }
}

/// Текст ошибки из тела ответа ERP: `exception`, `exc`, `message` или всё тело
fn remote_message(body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    parsed
        .as_ref()
        .and_then(|v| {
            ["exception", "exc", "message"]
                .iter()
                .find_map(|key| v.get(key).and_then(Value::as_str))
        })
        .map(str::to_string)
        .unwrap_or_else(|| body.trim().to_string())
}

fn message_is_not_found(body: &str) -> bool {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("exc_type").and_then(Value::as_str).map(|t| t == "DoesNotExistError"))
        .unwrap_or(false)
}
