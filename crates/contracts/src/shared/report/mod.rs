//! Отчёты: колонки и строки результата, форматирование ячеек,
//! описание отчёта целиком.

mod column;
mod descriptor;
mod formatter;

pub use column::{normalize_rows, ReportColumn, ReportRunRequest, ReportRunResponse, RowData};
pub use descriptor::ReportDescriptor;
pub use formatter::{
    default_format, escape_html, is_truthy, shipping_status_formatter, CellFormatter,
    DefaultFormatter, SHIPPING_STATUS_FIELD,
};
