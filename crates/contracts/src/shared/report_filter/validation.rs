//! Проверка согласованности типа поля, вариантов и значения по умолчанию

use chrono::NaiveDate;
use thiserror::Error;

use super::defaults::FilterDefault;
use super::descriptor::{FilterDescriptor, FilterOptions};
use super::field_type::FilterFieldType;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error("filter field name must be a non-empty identifier, got '{0}'")]
    InvalidFieldName(String),
    #[error("duplicate filter field '{0}'")]
    DuplicateField(String),
    #[error("{field_type} filter '{field}' requires {expected}")]
    MissingOptions {
        field: String,
        field_type: &'static str,
        expected: &'static str,
    },
    #[error("{field_type} filter '{field}' does not accept options of this shape")]
    UnexpectedOptions {
        field: String,
        field_type: &'static str,
    },
    #[error("default '{value}' of filter '{field}' is not one of its options")]
    DefaultNotInOptions { field: String, value: String },
    #[error("invalid default for filter '{field}': {reason}")]
    InvalidDefault { field: String, reason: String },
    #[error("filter '{0}' has zero width")]
    InvalidWidth(String),
    #[error("display-only filter '{0}' must be a Select")]
    DisplayOnlyNotSelect(String),
}

pub(super) fn validate_descriptor(d: &FilterDescriptor) -> Result<(), DescriptorError> {
    let name = d.field_name();
    if name.is_empty()
        || !name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(DescriptorError::InvalidFieldName(name.to_string()));
    }

    if d.width() == Some(0) {
        return Err(DescriptorError::InvalidWidth(name.to_string()));
    }

    if d.is_display_only() && d.field_type() != FilterFieldType::Select {
        return Err(DescriptorError::DisplayOnlyNotSelect(name.to_string()));
    }

    validate_options(d)?;
    validate_default(d)
}

fn validate_options(d: &FilterDescriptor) -> Result<(), DescriptorError> {
    let field = d.field_name().to_string();
    let field_type = d.field_type().as_str();

    match (d.field_type(), d.options()) {
        (FilterFieldType::Select, Some(FilterOptions::Flat(v))) if !v.is_empty() => Ok(()),
        (FilterFieldType::Select, Some(FilterOptions::Labeled(v))) if !v.is_empty() => Ok(()),
        (FilterFieldType::Select, Some(FilterOptions::Link(_))) => {
            Err(DescriptorError::UnexpectedOptions { field, field_type })
        }
        (FilterFieldType::Select, _) => Err(DescriptorError::MissingOptions {
            field,
            field_type,
            expected: "a non-empty option set",
        }),
        (FilterFieldType::Link, Some(FilterOptions::Link(target))) if !target.trim().is_empty() => {
            Ok(())
        }
        (FilterFieldType::Link, Some(FilterOptions::Link(_))) | (FilterFieldType::Link, None) => {
            Err(DescriptorError::MissingOptions {
                field,
                field_type,
                expected: "a target collection",
            })
        }
        (FilterFieldType::Link, Some(_)) => {
            Err(DescriptorError::UnexpectedOptions { field, field_type })
        }
        (_, None) => Ok(()),
        (_, Some(_)) => Err(DescriptorError::UnexpectedOptions { field, field_type }),
    }
}

fn validate_default(d: &FilterDescriptor) -> Result<(), DescriptorError> {
    let Some(default) = d.default_value() else {
        return Ok(());
    };
    let field = d.field_name().to_string();
    let invalid = |reason: &str| DescriptorError::InvalidDefault {
        field: field.clone(),
        reason: reason.to_string(),
    };

    match (d.field_type(), default) {
        (FilterFieldType::Select, FilterDefault::Value(value)) => {
            let allowed = d
                .options()
                .and_then(|o| o.values())
                .unwrap_or_default();
            if allowed.contains(&value.as_str()) {
                Ok(())
            } else {
                Err(DescriptorError::DefaultNotInOptions {
                    field: field.clone(),
                    value: value.clone(),
                })
            }
        }
        (FilterFieldType::Select, _) => Err(invalid("a Select default must be one of its options")),
        (FilterFieldType::Date, FilterDefault::Date(_)) => Ok(()),
        (FilterFieldType::Date, FilterDefault::Value(value)) => {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .map(|_| ())
                .map_err(|_| invalid("expected a YYYY-MM-DD date"))
        }
        (FilterFieldType::Date, FilterDefault::UserDefault(_)) => {
            Err(invalid("a Date default must be a date"))
        }
        (FilterFieldType::Link, FilterDefault::Value(_))
        | (FilterFieldType::Link, FilterDefault::UserDefault(_)) => Ok(()),
        (FilterFieldType::Int, FilterDefault::Value(value)) => value
            .parse::<i64>()
            .map(|_| ())
            .map_err(|_| invalid("expected an integer")),
        (FilterFieldType::Check, FilterDefault::Value(value)) => match value.as_str() {
            "0" | "1" => Ok(()),
            _ => Err(invalid("expected 0 or 1")),
        },
        (FilterFieldType::Data, FilterDefault::Value(_))
        | (FilterFieldType::Data, FilterDefault::UserDefault(_)) => Ok(()),
        (_, FilterDefault::Date(_)) => Err(invalid("dynamic dates are only valid for Date filters")),
        (_, _) => Err(invalid("unsupported default for this field type")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::report_filter::DynamicDate;

    #[test]
    fn test_select_requires_options() {
        let err = FilterDescriptor::builder("status", "Status", FilterFieldType::Select)
            .build()
            .unwrap_err();
        assert!(matches!(err, DescriptorError::MissingOptions { .. }));

        let err = FilterDescriptor::builder("status", "Status", FilterFieldType::Select)
            .flat_options(&[])
            .build()
            .unwrap_err();
        assert!(matches!(err, DescriptorError::MissingOptions { .. }));
    }

    #[test]
    fn test_select_default_must_be_member() {
        let ok = FilterDescriptor::builder("is_return", "Is Return", FilterFieldType::Select)
            .labeled_options(&[("All", "All"), ("Return", "Return")])
            .default_value("All")
            .build();
        assert!(ok.is_ok());

        let err = FilterDescriptor::builder("is_return", "Is Return", FilterFieldType::Select)
            .labeled_options(&[("All", "All"), ("Return", "Return")])
            .default_value("Everything")
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            DescriptorError::DefaultNotInOptions {
                field: "is_return".into(),
                value: "Everything".into()
            }
        );
    }

    #[test]
    fn test_link_requires_target() {
        let err = FilterDescriptor::builder("city", "City", FilterFieldType::Link)
            .build()
            .unwrap_err();
        assert!(matches!(err, DescriptorError::MissingOptions { .. }));

        let err = FilterDescriptor::builder("city", "City", FilterFieldType::Link)
            .flat_options(&["Cairo"])
            .build()
            .unwrap_err();
        assert!(matches!(err, DescriptorError::UnexpectedOptions { .. }));
    }

    #[test]
    fn test_date_defaults() {
        assert!(FilterDescriptor::builder("from_date", "From Date", FilterFieldType::Date)
            .default_date(DynamicDate::MonthStart)
            .build()
            .is_ok());
        assert!(FilterDescriptor::builder("from_date", "From Date", FilterFieldType::Date)
            .default_value("2024-01-01")
            .build()
            .is_ok());
        assert!(FilterDescriptor::builder("from_date", "From Date", FilterFieldType::Date)
            .default_value("01.01.2024")
            .build()
            .is_err());
        assert!(FilterDescriptor::builder("city", "City", FilterFieldType::Link)
            .link("City")
            .default_date(DynamicDate::Today)
            .build()
            .is_err());
    }

    #[test]
    fn test_field_name_and_width() {
        assert_eq!(
            FilterDescriptor::builder("From Date", "From Date", FilterFieldType::Date)
                .build()
                .unwrap_err(),
            DescriptorError::InvalidFieldName("From Date".into())
        );
        assert_eq!(
            FilterDescriptor::builder("city", "City", FilterFieldType::Link)
                .link("City")
                .width(0)
                .build()
                .unwrap_err(),
            DescriptorError::InvalidWidth("city".into())
        );
    }

    #[test]
    fn test_display_only_must_be_select() {
        let err = FilterDescriptor::builder("chart_type", "Switch Chart", FilterFieldType::Data)
            .display_only()
            .build()
            .unwrap_err();
        assert_eq!(err, DescriptorError::DisplayOnlyNotSelect("chart_type".into()));
    }
}
