use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::shared::report_filter::FilterValues;

/// Строка результата отчёта (читается, но никогда не изменяется)
pub type RowData = serde_json::Map<String, Value>;

/// Колонка результата отчёта.
///
/// Принимается как объект, так и старая строковая форма
/// `"Label:Fieldtype/Options:Width"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawColumn")]
pub struct ReportColumn {
    pub fieldname: String,
    pub label: String,
    pub fieldtype: String,
    pub options: Option<String>,
    pub width: Option<u32>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawColumn {
    Spec {
        #[serde(default)]
        fieldname: Option<String>,
        #[serde(default)]
        label: String,
        #[serde(default)]
        fieldtype: Option<String>,
        #[serde(default)]
        options: Option<String>,
        #[serde(default)]
        width: Option<u32>,
    },
    Legacy(String),
}

impl From<RawColumn> for ReportColumn {
    fn from(raw: RawColumn) -> Self {
        match raw {
            RawColumn::Spec {
                fieldname,
                label,
                fieldtype,
                options,
                width,
            } => ReportColumn {
                fieldname: fieldname.unwrap_or_else(|| scrub(&label)),
                label,
                fieldtype: fieldtype.unwrap_or_else(|| "Data".to_string()),
                options,
                width,
            },
            RawColumn::Legacy(spec) => ReportColumn::parse_legacy(&spec),
        }
    }
}

impl ReportColumn {
    pub fn new(fieldname: &str, label: &str, fieldtype: &str) -> Self {
        Self {
            fieldname: fieldname.to_string(),
            label: label.to_string(),
            fieldtype: fieldtype.to_string(),
            options: None,
            width: None,
        }
    }

    /// Разбор строки вида "Sales Order:Link/Sales Order:120"
    pub fn parse_legacy(spec: &str) -> Self {
        let mut parts = spec.split(':');
        let label = parts.next().unwrap_or_default().trim().to_string();
        let (fieldtype, options) = match parts.next() {
            Some(t) if !t.is_empty() => match t.split_once('/') {
                Some((ty, opt)) => (ty.to_string(), Some(opt.to_string())),
                None => (t.to_string(), None),
            },
            _ => ("Data".to_string(), None),
        };
        let width = parts.next().and_then(|w| w.trim().parse::<u32>().ok());
        Self {
            fieldname: scrub(&label),
            label,
            fieldtype,
            options,
            width,
        }
    }
}

/// "Shipping Status" -> "shipping_status"
fn scrub(label: &str) -> String {
    label
        .trim()
        .to_lowercase()
        .replace([' ', '-'], "_")
}

/// Запрос на выполнение отчёта.
///
/// Отчёт адресуется кодом (`d410`...), имя отчёта на стороне ERP
/// сервер берёт из описания: у двух отчётов оно совпадает.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRunRequest {
    pub report_code: String,
    #[serde(default)]
    pub filters: FilterValues,
}

/// Результат отчёта
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportRunResponse {
    #[serde(default)]
    pub columns: Vec<ReportColumn>,
    #[serde(default)]
    pub result: Vec<RowData>,
}

/// Приводит строки к объектам: массивы раскладываются по колонкам,
/// прочие значения отбрасываются
pub fn normalize_rows(columns: &[ReportColumn], rows: Vec<Value>) -> Vec<RowData> {
    rows.into_iter()
        .filter_map(|row| match row {
            Value::Object(map) => Some(map),
            Value::Array(cells) => Some(
                columns
                    .iter()
                    .zip(cells)
                    .map(|(col, cell)| (col.fieldname.clone(), cell))
                    .collect(),
            ),
            _ => None,
        })
        .collect()
}
