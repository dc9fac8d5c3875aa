use crate::shared::report::ReportDescriptor;
use crate::shared::report_filter::{
    DescriptorError, DynamicDate, FilterDescriptor, FilterFieldType, FilterSet,
};

pub const CODE: &str = "d411";
pub const REPORT_NAME: &str = "Shipping Company Orders";

/// Поле выбора графика: не фильтрует данные
pub const CHART_TYPE_FIELD: &str = "chart_type";

/// Заказы по службам доставки за месяц
pub fn report() -> Result<ReportDescriptor, DescriptorError> {
    let filters = FilterSet::new(vec![
        FilterDescriptor::builder("is_return", "Is Return", FilterFieldType::Select)
            .labeled_options(&[("All", "All"), ("Return", "Return"), ("No Return", "No Return")])
            .default_value("All")
            .build()?,
        FilterDescriptor::builder("from_date", "From Date", FilterFieldType::Date)
            .default_date(DynamicDate::MonthStart)
            .required()
            .build()?,
        FilterDescriptor::builder("to_date", "To Date", FilterFieldType::Date)
            .default_date(DynamicDate::MonthEnd)
            .required()
            .build()?,
        FilterDescriptor::builder("city", "City", FilterFieldType::Link)
            .link("City")
            .build()?,
        FilterDescriptor::builder("shipping_company", "Shipping Company", FilterFieldType::Link)
            .link("Shipping Company")
            .build()?,
        FilterDescriptor::builder("delivery_note_status", "Delivery Note Status", FilterFieldType::Select)
            .labeled_options(&[
                ("", "All"),
                ("Submitted", "Submitted"),
                ("Draft", "Draft"),
                ("Cancelled", "Cancelled"),
                ("To Bill", "To Bill"),
            ])
            .default_value("Submitted")
            .build()?,
        FilterDescriptor::builder(CHART_TYPE_FIELD, "Switch Chart", FilterFieldType::Select)
            .labeled_options(&[
                ("shipping_company", "By Shipping Company"),
                ("payment_status", "By Payment Status"),
                ("return_vs_sales", "Return vs Sales"),
                ("amount_by_company", "Amount by Shipping Company"),
            ])
            .default_value("shipping_company")
            .display_only()
            .build()?,
    ])?;

    Ok(ReportDescriptor::new(CODE, REPORT_NAME, filters))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::report_filter::DefaultsContext;
    use chrono::NaiveDate;

    #[test]
    fn test_chart_type_is_display_mode() {
        let report = report().unwrap();
        assert_eq!(report.display_mode_field(), Some(CHART_TYPE_FIELD));
        // переключатель идёт последним, после настоящих фильтров
        assert_eq!(
            report.filters.iter().last().map(|f| f.field_name()),
            Some(CHART_TYPE_FIELD)
        );
    }

    #[test]
    fn test_defaults_cover_current_month() {
        let report = report().unwrap();
        let ctx = DefaultsContext::new(NaiveDate::from_ymd_opt(2025, 2, 14).unwrap());
        let values = report.filters.initial_values(&ctx);
        assert_eq!(values.get("from_date").map(String::as_str), Some("2025-02-01"));
        assert_eq!(values.get("to_date").map(String::as_str), Some("2025-02-28"));
        assert_eq!(values.get("is_return").map(String::as_str), Some("All"));
        assert_eq!(values.get("delivery_note_status").map(String::as_str), Some("Submitted"));
        assert_eq!(values.get(CHART_TYPE_FIELD).map(String::as_str), Some("shipping_company"));
        assert_eq!(
            report.filters.missing_required(&values),
            Vec::<&str>::new()
        );
    }
}
