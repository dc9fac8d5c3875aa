//! Форматирование ячеек отчёта.
//!
//! Форматтер отчёта получает `(value, row, column, data, default_formatter)`
//! и возвращает HTML-разметку. Он обязан быть чистой функцией: одинаковые
//! входы дают одинаковую строку, `data` не изменяется.

use serde_json::Value;

use super::column::{ReportColumn, RowData};
use crate::enums::ShippingStatus;

/// Имя колонки со статусом доставки
pub const SHIPPING_STATUS_FIELD: &str = "shipping_status";

/// Форматирование по умолчанию (то, что отчёт делает без своего форматтера)
pub trait DefaultFormatter {
    fn format(&self, value: &Value, row: usize, column: &ReportColumn, data: &RowData) -> String;
}

impl<F> DefaultFormatter for F
where
    F: Fn(&Value, usize, &ReportColumn, &RowData) -> String,
{
    fn format(&self, value: &Value, row: usize, column: &ReportColumn, data: &RowData) -> String {
        self(value, row, column, data)
    }
}

/// Пользовательский форматтер отчёта
pub type CellFormatter =
    fn(&Value, usize, &ReportColumn, &RowData, &dyn DefaultFormatter) -> String;

/// Базовое форматирование значения по типу колонки
pub fn default_format(value: &Value, _row: usize, column: &ReportColumn, _data: &RowData) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => (if *b { "Yes" } else { "No" }).to_string(),
        Value::Number(n) => match column.fieldtype.as_str() {
            "Currency" | "Float" | "Percent" => n
                .as_f64()
                .map(|f| format!("{:.2}", f))
                .unwrap_or_else(|| n.to_string()),
            _ => n.to_string(),
        },
        Value::String(s) => escape_html(s),
        other => escape_html(&other.to_string()),
    }
}

/// Подсветка статуса доставки и выделение итоговых строк жирным.
///
/// Неизвестный статус всё равно оборачивается в span (цвет по умолчанию),
/// пустой статус остаётся как есть.
pub fn shipping_status_formatter(
    value: &Value,
    row: usize,
    column: &ReportColumn,
    data: &RowData,
    default_formatter: &dyn DefaultFormatter,
) -> String {
    let mut value = default_formatter.format(value, row, column, data);

    if column.fieldname == SHIPPING_STATUS_FIELD && !value.is_empty() {
        let color = ShippingStatus::color_for(&value);
        value = format!(
            "<span style=\"color: {}; font-weight: bold;\">{}</span>",
            color, value
        );
    }

    if data.get("bold").map(is_truthy).unwrap_or(false) {
        value = format!("<strong>{}</strong>", value);
    }

    value
}

/// Истинность значения в духе JS: null, false, 0, "" — ложь
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::shipping_status::FALLBACK_STATUS_COLOR;
    use serde_json::json;

    fn status_column() -> ReportColumn {
        ReportColumn::new(SHIPPING_STATUS_FIELD, "Shipping Status", "Data")
    }

    fn row(value: Value) -> RowData {
        value.as_object().cloned().unwrap_or_default()
    }

    fn fmt(value: Value, column: &ReportColumn, data: &RowData) -> String {
        shipping_status_formatter(&value, 0, column, data, &default_format)
    }

    #[test]
    fn test_known_statuses_use_mapped_color() {
        let col = status_column();
        for status in ShippingStatus::all() {
            let out = fmt(json!(status.label()), &col, &RowData::new());
            assert_eq!(
                out,
                format!(
                    "<span style=\"color: {}; font-weight: bold;\">{}</span>",
                    status.color(),
                    status.label()
                )
            );
        }
    }

    #[test]
    fn test_unknown_status_gets_fallback_span() {
        let out = fmt(json!("Held at Customs"), &status_column(), &RowData::new());
        assert_eq!(
            out,
            format!(
                "<span style=\"color: {}; font-weight: bold;\">Held at Customs</span>",
                FALLBACK_STATUS_COLOR
            )
        );
    }

    #[test]
    fn test_empty_status_passes_through() {
        let col = status_column();
        let data = RowData::new();
        assert_eq!(fmt(json!(""), &col, &data), default_format(&json!(""), 0, &col, &data));
        assert_eq!(fmt(Value::Null, &col, &data), "");
    }

    #[test]
    fn test_bold_wraps_colored_value() {
        let data = row(json!({"bold": 1, "shipping_status": "Lost"}));
        assert_eq!(
            fmt(json!("Lost"), &status_column(), &data),
            "<strong><span style=\"color: #6c757d; font-weight: bold;\">Lost</span></strong>"
        );
    }

    #[test]
    fn test_bold_applies_to_any_column() {
        let col = ReportColumn::new("shipping_company", "Shipping Company", "Link");
        let data = row(json!({"bold": true}));
        assert_eq!(fmt(json!("Aramex"), &col, &data), "<strong>Aramex</strong>");

        let data = row(json!({"bold": 0}));
        assert_eq!(fmt(json!("Aramex"), &col, &data), "Aramex");
    }

    #[test]
    fn test_other_columns_untouched() {
        let col = ReportColumn::new("status", "Status", "Data");
        assert_eq!(fmt(json!("Delivered"), &col, &RowData::new()), "Delivered");
    }

    #[test]
    fn test_formatter_is_pure() {
        let col = status_column();
        let data = row(json!({"bold": "yes", "shipping_status": "Pending"}));
        let before = data.clone();
        let first = fmt(json!("Pending"), &col, &data);
        let second = fmt(json!("Pending"), &col, &data);
        assert_eq!(first, second);
        assert_eq!(data, before);
    }

    #[test]
    fn test_default_formatter_is_delegated_first() {
        let upper = |v: &Value, _: usize, _: &ReportColumn, _: &RowData| {
            v.as_str().unwrap_or_default().to_uppercase()
        };
        let out = shipping_status_formatter(
            &json!("delivered"),
            3,
            &status_column(),
            &RowData::new(),
            &upper,
        );
        // "DELIVERED" нет в справочнике — цвет по умолчанию
        assert!(out.contains(FALLBACK_STATUS_COLOR));
        assert!(out.contains(">DELIVERED<"));
    }

    #[test]
    fn test_default_format() {
        let money = ReportColumn::new("amount", "Amount", "Currency");
        let data = RowData::new();
        assert_eq!(default_format(&json!(12), 0, &money, &data), "12.00");
        assert_eq!(default_format(&json!("<b>"), 0, &money, &data), "&lt;b&gt;");
        assert_eq!(default_format(&json!(true), 0, &money, &data), "Yes");
    }
}
