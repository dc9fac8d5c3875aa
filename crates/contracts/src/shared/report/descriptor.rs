use serde_json::Value;
use std::fmt;

use super::column::{ReportColumn, RowData};
use super::formatter::{default_format, CellFormatter};
use crate::shared::export::{ExportRequest, FileFormat};
use crate::shared::report_filter::{FilterSet, FilterValues};

/// Описание отчёта: фильтры, необязательный форматтер и действие выгрузки
#[derive(Clone)]
pub struct ReportDescriptor {
    /// Код отчёта в приложении (например, "d411")
    pub code: &'static str,
    /// Имя отчёта в ERP
    pub report_name: &'static str,
    pub filters: FilterSet,
    pub formatter: Option<CellFormatter>,
    /// Формат для кнопки выгрузки на панели отчёта
    pub export_format: Option<FileFormat>,
}

impl ReportDescriptor {
    pub fn new(code: &'static str, report_name: &'static str, filters: FilterSet) -> Self {
        Self {
            code,
            report_name,
            filters,
            formatter: None,
            export_format: None,
        }
    }

    pub fn with_formatter(mut self, formatter: CellFormatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    pub fn with_export(mut self, format: FileFormat) -> Self {
        self.export_format = Some(format);
        self
    }

    /// Поле-переключатель режима отображения
    pub fn display_mode_field(&self) -> Option<&str> {
        self.filters.display_mode_field().map(|f| f.field_name())
    }

    pub fn format_cell(&self, value: &Value, row: usize, column: &ReportColumn, data: &RowData) -> String {
        match self.formatter {
            Some(formatter) => formatter(value, row, column, data, &default_format),
            None => default_format(value, row, column, data),
        }
    }

    /// Запрос выгрузки по текущим значениям фильтров
    pub fn export_request(&self, values: &FilterValues) -> Option<ExportRequest> {
        self.export_format.map(|format| {
            ExportRequest::new(self.report_name, format, self.filters.active_values(values))
        })
    }
}

impl fmt::Debug for ReportDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportDescriptor")
            .field("code", &self.code)
            .field("report_name", &self.report_name)
            .field("filters", &self.filters)
            .field("has_formatter", &self.formatter.is_some())
            .field("export_format", &self.export_format)
            .finish()
    }
}
