//! Конверт ответа серверного метода: `{message: T}` либо `{exc: String}`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Префикс URL для вызова серверных методов
pub const METHOD_PATH_PREFIX: &str = "/api/method/";

/// Ответ серверного метода.
///
/// Наличие `exc` всегда означает ошибку, даже если рядом пришёл `message`,
/// поэтому вариант `Exception` проверяется первым.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RpcResponse<T> {
    Exception { exc: String },
    Message { message: T },
}

impl<T> RpcResponse<T> {
    pub fn ok(message: T) -> Self {
        RpcResponse::Message { message }
    }

    pub fn exception(exc: impl Into<String>) -> Self {
        RpcResponse::Exception { exc: exc.into() }
    }

    pub fn into_result(self) -> Result<T, String> {
        match self {
            RpcResponse::Message { message } => Ok(message),
            RpcResponse::Exception { exc } => Err(exc),
        }
    }
}

/// Разбор тела ответа с учётом HTTP-статуса.
///
/// `{exc}` возвращается при любом статусе. `{message}` считается успехом
/// только при 2xx; всё остальное (чужой формат ошибки, HTML от прокси)
/// становится `Err` с текстом "HTTP error: <status> <body>".
pub fn parse_envelope<T: DeserializeOwned>(status: u16, body: &str) -> Result<RpcResponse<T>, String> {
    match serde_json::from_str::<RpcResponse<T>>(body) {
        Ok(exc @ RpcResponse::Exception { .. }) => Ok(exc),
        Ok(message) if (200..300).contains(&status) => Ok(message),
        _ => Err(format!("HTTP error: {} {}", status, body.trim())),
    }
}

/// Полный путь метода: `/api/method/<dotted.path>`
pub fn method_url(method: &str) -> String {
    format!("{}{}", METHOD_PATH_PREFIX, method)
}
