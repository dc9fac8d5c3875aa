use crate::enums::SettlementStatus;
use crate::shared::report::ReportDescriptor;
use crate::shared::report_filter::{
    DescriptorError, DynamicDate, FilterDescriptor, FilterFieldType, FilterSet,
};

pub const CODE: &str = "d410";
pub const REPORT_NAME: &str = "Shipping Company Analytics";

/// Аналитика по службам доставки: период, служба, город, статус расчётов
pub fn report() -> Result<ReportDescriptor, DescriptorError> {
    let settlement: Vec<&str> = SettlementStatus::all().iter().map(|s| s.label()).collect();

    let filters = FilterSet::new(vec![
        FilterDescriptor::builder("shipping_company", "Shipping Company", FilterFieldType::Link)
            .link("Shipping Company")
            .width(200)
            .build()?,
        FilterDescriptor::builder("from_date", "From Date", FilterFieldType::Date)
            .default_date(DynamicDate::MonthsFromToday(-1))
            .width(120)
            .build()?,
        FilterDescriptor::builder("to_date", "To Date", FilterFieldType::Date)
            .default_date(DynamicDate::Today)
            .width(120)
            .build()?,
        FilterDescriptor::builder("settlement_status", "Settlement Status", FilterFieldType::Select)
            .flat_options(&settlement)
            .default_value(SettlementStatus::All.label())
            .width(120)
            .build()?,
        FilterDescriptor::builder("city", "City", FilterFieldType::Link)
            .link("City")
            .width(120)
            .build()?,
    ])?;

    Ok(ReportDescriptor::new(CODE, REPORT_NAME, filters))
}
