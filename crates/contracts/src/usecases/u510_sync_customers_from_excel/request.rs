use serde::{Deserialize, Serialize};

/// Запрос на синхронизацию: ссылка на ранее загруженный файл
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncCustomersRequest {
    /// Значение поля Attach, например "/files/orders_export.xlsx"
    pub file_url: String,
}

/// Ответ метода upload_file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub file_url: String,
    pub file_name: String,
}
