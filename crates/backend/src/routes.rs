use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use contracts::shared::export::EXPORT_ENDPOINT;
use contracts::shared::rpc::method_url;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u510_sync_customers_from_excel::{SyncCustomersFromExcel, UPLOAD_FILE_METHOD};
use tower_http::services::ServeDir;

use crate::api::handlers;

/// Предел размера загружаемой выгрузки
const UPLOAD_LIMIT_BYTES: usize = 25 * 1024 * 1024;

/// Конфигурация всех роутов приложения
pub fn configure_routes(static_dir: &str) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // SERVER METHODS (конверт {message} / {exc})
        // ========================================
        .route(
            &method_url(UPLOAD_FILE_METHOD),
            post(handlers::u510_sync_customers::upload_file)
                .layer(DefaultBodyLimit::max(UPLOAD_LIMIT_BYTES)),
        )
        .route(
            &SyncCustomersFromExcel::method_url(),
            post(handlers::u510_sync_customers::sync_customers_from_excel),
        )
        // Выгрузку формирует ERP
        .route(EXPORT_ENDPOINT, get(handlers::reports::export_query))
        // ========================================
        // REPORTS
        // ========================================
        .route("/api/reports/run", post(handlers::reports::run_report))
        .route("/api/link/search", get(handlers::reports::search_link))
        .fallback_service(ServeDir::new(static_dir))
}
