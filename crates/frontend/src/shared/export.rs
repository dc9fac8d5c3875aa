//! Выгрузка отчёта: браузер переходит на адрес выгрузки, файл отдаёт ERP.

use contracts::shared::export::{trigger_export, ExportRequest, Navigator};

use super::api_utils::api_url;

/// Переход через `window.location`
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn open(&self, url: &str) {
        let Some(window) = web_sys::window() else {
            log::error!("No window object, cannot open {}", url);
            return;
        };
        if let Err(e) = window.location().set_href(&api_url(url)) {
            log::error!("Failed to navigate to {}: {:?}", url, e);
        }
    }
}

/// Открыть выгрузку отчёта (ровно одна навигация на вызов)
pub fn export_report(request: &ExportRequest) -> Result<(), String> {
    let url = trigger_export(&BrowserNavigator, request)
        .map_err(|e| format!("Failed to encode filters: {}", e))?;
    log::info!("Export started: {}", url);
    Ok(())
}
