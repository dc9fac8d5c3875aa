use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::shared::rpc::RpcResponse;
use thiserror::Error;

use crate::shared::erp::ErpError;

/// Ошибки синхронизации, которые прерывают весь вызов.
///
/// Ошибки отдельных заказов сюда не попадают: они копятся в
/// `ImportResult::errors`.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("file_url is required")]
    MissingFileUrl,
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("Failed to read uploaded file: {0}")]
    ReadFailed(String),
    #[error("No file in upload request")]
    EmptyUpload,
    #[error("Invalid upload: {0}")]
    InvalidUpload(String),
    #[error(transparent)]
    Host(#[from] ErpError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SyncError {
    /// Ошибки входных данных отдаются с 417, как ValidationError в ERP
    pub fn status(&self) -> StatusCode {
        match self {
            SyncError::MissingFileUrl
            | SyncError::FileNotFound(_)
            | SyncError::ReadFailed(_)
            | SyncError::EmptyUpload
            | SyncError::InvalidUpload(_) => StatusCode::EXPECTATION_FAILED,
            SyncError::Host(_) | SyncError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SyncError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Customer sync failed: {}", self);
        } else {
            tracing::warn!("Customer sync rejected: {}", self);
        }
        (status, Json(RpcResponse::<()>::exception(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_and_status() {
        assert_eq!(SyncError::MissingFileUrl.to_string(), "file_url is required");
        assert_eq!(
            SyncError::FileNotFound("/files/a.xlsx".into()).to_string(),
            "File not found: /files/a.xlsx"
        );
        assert_eq!(SyncError::MissingFileUrl.status(), StatusCode::EXPECTATION_FAILED);
        assert_eq!(
            SyncError::Host(ErpError::NotFound("Sales Order".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
