//! Отчёты по службам доставки.
//!
//! Каждый отчёт — отдельный модуль с функцией `report()`, которая собирает
//! и проверяет описание. Реестр ниже связывает код отчёта с его описанием.

pub mod d410_shipping_company_analytics;
pub mod d411_shipping_company_orders;
pub mod d412_shipping_status_analytics;

use crate::shared::report::ReportDescriptor;
use crate::shared::report_filter::DescriptorError;

/// Элемент реестра отчётов
#[derive(Debug, Clone, Copy)]
pub struct ReportEntry {
    pub code: &'static str,
    pub title: &'static str,
    pub build: fn() -> Result<ReportDescriptor, DescriptorError>,
}

pub fn all_reports() -> Vec<ReportEntry> {
    vec![
        ReportEntry {
            code: d410_shipping_company_analytics::CODE,
            title: "Shipping Company Analytics",
            build: d410_shipping_company_analytics::report,
        },
        ReportEntry {
            code: d411_shipping_company_orders::CODE,
            title: "Shipping Company Orders",
            build: d411_shipping_company_orders::report,
        },
        ReportEntry {
            code: d412_shipping_status_analytics::CODE,
            title: "Shipping Status Analytics",
            build: d412_shipping_status_analytics::report,
        },
    ]
}

/// Собрать описание отчёта по коду; `None`, если код неизвестен
pub fn find_report(code: &str) -> Option<Result<ReportDescriptor, DescriptorError>> {
    all_reports()
        .into_iter()
        .find(|entry| entry.code == code)
        .map(|entry| (entry.build)())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_reports_build() {
        for entry in all_reports() {
            let report = (entry.build)()
                .unwrap_or_else(|e| panic!("report {} is invalid: {}", entry.code, e));
            assert_eq!(report.code, entry.code);
        }
    }

    #[test]
    fn test_codes_are_unique() {
        let codes: HashSet<_> = all_reports().iter().map(|e| e.code).collect();
        assert_eq!(codes.len(), all_reports().len());
    }

    #[test]
    fn test_find_report() {
        assert!(find_report("d411").is_some());
        assert!(find_report("d999").is_none());
    }
}
