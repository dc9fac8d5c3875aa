use axum::extract::Multipart;
use axum::Json;
use contracts::shared::rpc::RpcResponse;
use contracts::usecases::u510_sync_customers_from_excel::{
    ImportResult, SyncCustomersFromExcel, SyncCustomersRequest, UploadedFile, FILE_FIELD,
};
use contracts::usecases::common::UseCaseMetadata;
use std::sync::Arc;

use crate::shared::{config, erp};
use crate::usecases::u510_sync_customers_from_excel::{upload, ErpSalesGateway, SyncError, SyncExecutor};

/// POST /api/method/upload_file
pub async fn upload_file(mut multipart: Multipart) -> Result<Json<RpcResponse<UploadedFile>>, SyncError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| SyncError::InvalidUpload(e.to_string()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| SyncError::InvalidUpload(e.to_string()))?;

        let public_dir = config::public_dir(config::get());
        let uploaded = upload::save_upload(&public_dir, &file_name, &bytes).await?;
        return Ok(Json(RpcResponse::ok(uploaded)));
    }

    Err(SyncError::EmptyUpload)
}

/// POST /api/method/ecommerce_integrations.ecommerce_integrations.controllers.shopify_sync.sync_customers_from_excel
pub async fn sync_customers_from_excel(
    Json(request): Json<SyncCustomersRequest>,
) -> Result<Json<RpcResponse<ImportResult>>, SyncError> {
    let gateway = Arc::new(ErpSalesGateway::new(erp::client()?));
    let executor = SyncExecutor::new(gateway, config::public_dir(config::get()));

    tracing::info!("{}: {}", SyncCustomersFromExcel::full_name(), request.file_url);
    let result = executor.sync(&request).await?;
    Ok(Json(RpcResponse::ok(result)))
}
