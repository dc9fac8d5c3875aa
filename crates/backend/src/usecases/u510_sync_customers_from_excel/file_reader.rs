use calamine::{open_workbook_auto, Data, DataType, Reader};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;

use super::error::SyncError;

/// Расширения, которые читаются как книга Excel; остальное — как CSV
pub const EXCEL_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xltx", "xltm"];

pub const CREATED_AT_COLUMN: &str = "Created at";
pub const ID_COLUMN: &str = "Id";

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").expect("valid date pattern"));

/// Дата по умолчанию, если в файле нет ни одной даты (1970-01-01)
pub fn epoch() -> NaiveDate {
    NaiveDate::default()
}

/// Строка выгрузки заказов: значения по заголовкам
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetRow {
    /// Номер строки в файле; заголовок — строка 1
    pub line: usize,
    pub cells: HashMap<String, String>,
}

impl SheetRow {
    /// Значение ячейки без пробелов по краям; пустое считается отсутствующим
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .get(column)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// Прочитать первый лист книги или CSV с заголовками
pub fn read_rows(path: &Path) -> Result<Vec<SheetRow>, SyncError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let rows = if EXCEL_EXTENSIONS.contains(&ext.as_str()) {
        read_workbook(path)
    } else {
        read_csv(path)
    }
    .map_err(SyncError::ReadFailed)?;

    tracing::info!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

fn read_workbook(path: &Path) -> Result<Vec<SheetRow>, String> {
    let mut workbook = open_workbook_auto(path).map_err(|e| e.to_string())?;
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(|e| e.to_string())?,
        None => return Ok(Vec::new()),
    };

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(|c| cell_text(c).trim().to_string()).collect(),
        None => return Ok(Vec::new()),
    };

    Ok(rows
        .enumerate()
        .map(|(idx, cells)| SheetRow {
            line: idx + 2,
            cells: headers
                .iter()
                .zip(cells)
                .filter(|(h, _)| !h.is_empty())
                .map(|(h, c)| (h.clone(), cell_text(c)))
                .collect(),
        })
        .collect())
}

fn read_csv(path: &Path) -> Result<Vec<SheetRow>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| e.to_string())?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| e.to_string())?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| e.to_string())?;
        rows.push(SheetRow {
            line: idx + 2,
            cells: headers
                .iter()
                .zip(record.iter())
                .filter(|(h, _)| !h.is_empty())
                .map(|(h, v)| (h.clone(), v.to_string()))
                .collect(),
        });
    }
    Ok(rows)
}

/// Текст ячейки: целые числа без дробной части (Id заказа часто приходит числом)
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Float(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
        Data::Float(n) => n.to_string(),
        Data::Int(n) => n.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(_) => cell
            .as_datetime()
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default(),
        Data::Error(e) => format!("#{:?}", e),
    }
}

/// Самая ранняя дата `YYYY-MM-DD` из колонки "Created at"
pub fn earliest_created_date(rows: &[SheetRow]) -> NaiveDate {
    rows.iter()
        .filter_map(|row| row.get(CREATED_AT_COLUMN))
        .filter_map(find_iso_date)
        .min()
        .unwrap_or_else(epoch)
}

/// Первая подстрока вида `dddd-dd-dd`, которая является настоящей датой
fn find_iso_date(text: &str) -> Option<NaiveDate> {
    ISO_DATE
        .find_iter(text)
        .find_map(|m| NaiveDate::parse_from_str(m.as_str(), "%Y-%m-%d").ok())
}

/// Индекс строк по Id заказа; строки без Id пропускаются
pub fn index_by_order_id(rows: &[SheetRow]) -> HashMap<String, &SheetRow> {
    rows.iter()
        .filter_map(|row| row.get(ID_COLUMN).map(|id| (id.to_string(), row)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn row(line: usize, pairs: &[(&str, &str)]) -> SheetRow {
        SheetRow {
            line,
            cells: pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        }
    }

    #[test]
    fn test_read_csv_with_trimmed_headers() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, " Id ,Shipping Name,Created at").unwrap();
        writeln!(file, "1001,Alice,2024-03-05 10:00:00 +0200").unwrap();
        writeln!(file, "1002,Bob").unwrap();

        let rows = read_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].line, 2);
        assert_eq!(rows[0].get("Id"), Some("1001"));
        assert_eq!(rows[1].get("Shipping Name"), Some("Bob"));
        assert_eq!(rows[1].get("Created at"), None);
    }

    #[test]
    fn test_unknown_extension_reads_as_csv() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(file, "Id,Phone").unwrap();
        writeln!(file, "7,+20100").unwrap();
        let rows = read_rows(file.path()).unwrap();
        assert_eq!(rows[0].get("Phone"), Some("+20100"));
    }

    #[test]
    fn test_broken_workbook_is_read_error() {
        let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        writeln!(file, "not a zip archive").unwrap();
        let err = read_rows(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read uploaded file: "));
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Float(5432109876543.0)), "5432109876543");
        assert_eq!(cell_text(&Data::Float(1.5)), "1.5");
        assert_eq!(cell_text(&Data::Int(42)), "42");
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::String("x".into())), "x");
    }

    #[test]
    fn test_earliest_date() {
        let rows = vec![
            row(2, &[("Created at", "2024-03-05 10:00:00 +0200")]),
            row(3, &[("Created at", "created 2024-02-29T08:00")]),
            row(4, &[("Created at", "yesterday")]),
            row(5, &[]),
        ];
        assert_eq!(
            earliest_created_date(&rows),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert_eq!(earliest_created_date(&rows[2..]), epoch());
        assert_eq!(epoch().to_string(), "1970-01-01");
    }

    #[test]
    fn test_invalid_calendar_date_ignored() {
        assert_eq!(find_iso_date("2024-13-45"), None);
        assert_eq!(find_iso_date("2024-1-5"), None);
        assert_eq!(find_iso_date("x2023-12-31y"), NaiveDate::from_ymd_opt(2023, 12, 31));
        assert_eq!(
            find_iso_date("2024-13-01 / 2024-02-03"),
            NaiveDate::from_ymd_opt(2024, 2, 3)
        );
    }

    #[test]
    fn test_index_by_order_id() {
        let rows = vec![
            row(2, &[("Id", " 1001 ")]),
            row(3, &[("Id", "")]),
            row(4, &[("Name", "#1003")]),
        ];
        let index = index_by_order_id(&rows);
        assert_eq!(index.len(), 1);
        assert_eq!(index["1001"].line, 2);
    }
}
