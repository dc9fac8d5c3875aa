//! Экспорт отчёта: построение URL выгрузки по текущим фильтрам.
//!
//! Проверка полноты фильтров здесь не делается — это задача
//! самой точки выгрузки.

use serde::{Deserialize, Serialize};

use crate::shared::report_filter::FilterValues;

pub const EXPORT_ENDPOINT: &str = "/api/method/frappe.desk.query_report.export_query";

/// Формат файла выгрузки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileFormat {
    Excel,
    #[serde(rename = "CSV")]
    Csv,
}

impl FileFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Excel => "Excel",
            FileFormat::Csv => "CSV",
        }
    }

    /// Подпись кнопки на панели отчёта
    pub fn action_label(&self) -> &'static str {
        match self {
            FileFormat::Excel => "Export to Excel",
            FileFormat::Csv => "Export to CSV",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub report_name: String,
    pub file_format: FileFormat,
    pub filters: FilterValues,
}

impl ExportRequest {
    pub fn new(report_name: impl Into<String>, file_format: FileFormat, filters: FilterValues) -> Self {
        Self {
            report_name: report_name.into(),
            file_format,
            filters,
        }
    }

    /// `<endpoint>?report_name=..&file_format_type=..&filters=<urlencoded json>`
    pub fn to_url(&self) -> Result<String, serde_json::Error> {
        let filters_json = serde_json::to_string(&self.filters)?;
        Ok(format!(
            "{}?report_name={}&file_format_type={}&filters={}",
            EXPORT_ENDPOINT,
            urlencoding::encode(&self.report_name),
            self.file_format.as_str(),
            urlencoding::encode(&filters_json)
        ))
    }
}

/// Переход браузера по адресу (новое окно или скачивание)
pub trait Navigator {
    fn open(&self, url: &str);
}

impl<T: Navigator + ?Sized> Navigator for &T {
    fn open(&self, url: &str) {
        (**self).open(url)
    }
}

/// Действие "Export to ...": ровно один переход на вызов
pub fn trigger_export(navigator: &dyn Navigator, request: &ExportRequest) -> Result<String, serde_json::Error> {
    let url = request.to_url()?;
    navigator.open(&url);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingNavigator {
        opened: RefCell<Vec<String>>,
    }

    impl Navigator for RecordingNavigator {
        fn open(&self, url: &str) {
            self.opened.borrow_mut().push(url.to_string());
        }
    }

    fn query_param<'a>(url: &'a str, key: &str) -> Option<&'a str> {
        let (_, query) = url.split_once('?')?;
        query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    #[test]
    fn test_export_url_contains_filters_and_report_name() {
        let mut filters = FilterValues::new();
        filters.insert("from_date".into(), "2024-01-01".into());
        let request = ExportRequest::new("Shipping Company Orders", FileFormat::Excel, filters);

        let nav = RecordingNavigator::default();
        let url = trigger_export(&nav, &request).unwrap();

        assert_eq!(nav.opened.borrow().len(), 1);
        assert_eq!(nav.opened.borrow()[0], url);
        assert!(url.starts_with(EXPORT_ENDPOINT));

        let encoded_filters = urlencoding::encode(r#"{"from_date":"2024-01-01"}"#).into_owned();
        assert!(url.contains(&encoded_filters));

        let name = query_param(&url, "report_name").unwrap();
        assert_eq!(urlencoding::decode(name).unwrap(), "Shipping Company Orders");
        assert_eq!(query_param(&url, "file_format_type"), Some("Excel"));
    }

    #[test]
    fn test_empty_filters_still_exported() {
        let request = ExportRequest::new("Shipping Company Analytics", FileFormat::Csv, FilterValues::new());
        let url = request.to_url().unwrap();
        assert_eq!(query_param(&url, "filters"), Some("%7B%7D"));
        assert_eq!(query_param(&url, "file_format_type"), Some("CSV"));
    }
}
