use contracts::shared::rpc::{method_url, RpcResponse};
use contracts::usecases::u510_sync_customers_from_excel::{
    ImportResult, SyncCustomersRequest, UploadedFile, FILE_FIELD, SYNC_CUSTOMERS_METHOD,
    UPLOAD_FILE_METHOD,
};
use gloo_net::http::Request;
use web_sys::FormData;

use crate::shared::api_utils::{api_url, call_method, read_envelope};

/// Загрузить файл для поля Attach
pub async fn upload_file(file: web_sys::File) -> Result<UploadedFile, String> {
    let form_data = FormData::new().map_err(|e| format!("{e:?}"))?;
    form_data
        .append_with_blob_and_filename(FILE_FIELD, &file, &file.name())
        .map_err(|e| format!("{e:?}"))?;

    let response = Request::post(&api_url(&method_url(UPLOAD_FILE_METHOD)))
        .body(form_data)
        .map_err(|e| format!("Failed to build request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    read_envelope::<UploadedFile>(response).await?.into_result()
}

/// Вызов синхронизации. `Err` только при сетевой ошибке,
/// ошибка сервера приходит как `RpcResponse::Exception`.
pub async fn sync_customers(
    request: &SyncCustomersRequest,
) -> Result<RpcResponse<ImportResult>, String> {
    call_method(SYNC_CUSTOMERS_METHOD, request).await
}
