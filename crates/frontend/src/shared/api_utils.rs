//! API utilities for frontend-backend communication
//!
//! Все вызовы возвращают `Result<_, String>`: текст ошибки сразу уходит
//! в уведомление.

use contracts::shared::rpc::{method_url, parse_envelope, RpcResponse};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Get the base URL for API requests
///
/// Backend слушает порт 3000 на том же хосте, что и страница.
/// Пустая строка, если window недоступен.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Build a full API URL from a path
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// GET и разбор JSON
pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let response = Request::get(&api_url(path))
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;
    read_json(response).await
}

/// POST JSON и разбор JSON-ответа
pub async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, String> {
    let response = Request::post(&api_url(path))
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;
    read_json(response).await
}

/// Вызов серверного метода. Тело ответа разбирается и при ошибочном
/// статусе: сервер кладёт текст ошибки в `exc`.
pub async fn call_method<B: Serialize, T: DeserializeOwned>(
    method: &str,
    args: &B,
) -> Result<RpcResponse<T>, String> {
    let response = Request::post(&api_url(&method_url(method)))
        .json(args)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;
    read_envelope(response).await
}

/// Разбор конверта `{message}` / `{exc}`: `{exc}` при любом статусе,
/// `{message}` только при успешном
pub async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<RpcResponse<T>, String> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| format!("Failed to read response: {}", e))?;
    parse_envelope(status, &text)
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    if !response.ok() {
        // ошибки proxy приходят в том же конверте {exc}
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        return Err(match serde_json::from_str::<RpcResponse<serde_json::Value>>(&text) {
            Ok(RpcResponse::Exception { exc }) => exc,
            _ => format!("HTTP error: {}", status),
        });
    }
    response
        .json()
        .await
        .map_err(|e| format!("Failed to parse JSON: {}", e))
}
