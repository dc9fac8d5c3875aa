use crate::enums::ShippingStatus;
use crate::shared::export::FileFormat;
use crate::shared::report::{shipping_status_formatter, ReportDescriptor};
use crate::shared::report_filter::{
    DescriptorError, DynamicDate, FilterDescriptor, FilterFieldType, FilterSet,
};

pub const CODE: &str = "d412";
pub const REPORT_NAME: &str = "Shipping Company Analytics";

/// Аналитика по статусам доставки: подсветка статусов, итоговые строки
/// жирным, выгрузка в Excel
pub fn report() -> Result<ReportDescriptor, DescriptorError> {
    let mut statuses = vec![""];
    statuses.extend(ShippingStatus::all().iter().map(|s| s.label()));

    let filters = FilterSet::new(vec![
        FilterDescriptor::builder("from_date", "From Date", FilterFieldType::Date)
            .default_date(DynamicDate::MonthsFromToday(-1))
            .required()
            .build()?,
        FilterDescriptor::builder("to_date", "To Date", FilterFieldType::Date)
            .default_date(DynamicDate::Today)
            .required()
            .build()?,
        FilterDescriptor::builder("shipping_company", "Shipping Company", FilterFieldType::Link)
            .link("Shipping Company")
            .build()?,
        FilterDescriptor::builder("shipping_status", "Shipping Status", FilterFieldType::Select)
            .flat_options(&statuses)
            .build()?,
        FilterDescriptor::builder("company", "Company", FilterFieldType::Link)
            .link("Company")
            .user_default("Company")
            .build()?,
        FilterDescriptor::builder("customer", "Customer", FilterFieldType::Link)
            .link("Customer")
            .build()?,
    ])?;

    Ok(ReportDescriptor::new(CODE, REPORT_NAME, filters)
        .with_formatter(shipping_status_formatter)
        .with_export(FileFormat::Excel))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::report::ReportColumn;
    use crate::shared::report_filter::FilterValues;
    use serde_json::json;

    #[test]
    fn test_formatter_registered() {
        let report = report().unwrap();
        let col = ReportColumn::new("shipping_status", "Shipping Status", "Data");
        let data = json!({"bold": 1}).as_object().cloned().unwrap();
        assert_eq!(
            report.format_cell(&json!("Delivered"), 0, &col, &data),
            "<strong><span style=\"color: #28a745; font-weight: bold;\">Delivered</span></strong>"
        );
    }

    #[test]
    fn test_export_request_uses_report_name() {
        let report = report().unwrap();
        let mut values = FilterValues::new();
        values.insert("from_date".into(), "2024-01-01".into());
        values.insert("customer".into(), String::new());

        let request = report.export_request(&values).unwrap();
        assert_eq!(request.report_name, REPORT_NAME);
        assert_eq!(request.file_format, FileFormat::Excel);
        assert_eq!(request.filters.len(), 1);
    }

    #[test]
    fn test_status_options_start_with_blank() {
        let report = report().unwrap();
        let values = report
            .filters
            .get("shipping_status")
            .and_then(|f| f.options())
            .and_then(|o| o.values())
            .unwrap();
        assert_eq!(values.first(), Some(&""));
        assert_eq!(values.len(), 7);
    }
}
