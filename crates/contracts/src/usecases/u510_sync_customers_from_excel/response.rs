use serde::{Deserialize, Serialize};

/// Ошибка обработки одной строки файла
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    /// Номер строки в файле (заголовок — строка 1)
    pub row: usize,
    pub error: String,
}

/// Итог синхронизации
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    #[serde(default)]
    pub updated: usize,
    #[serde(default)]
    pub skipped: usize,
    #[serde(default)]
    pub errors: Vec<RowError>,
}

impl ImportResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
