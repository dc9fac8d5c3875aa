//! Декларативные описания фильтров отчётов.
//!
//! Описание создаётся через [`FilterDescriptor::builder`] и проверяется в
//! момент сборки: тип поля определяет допустимые `options` и `default`.
//! Набор фильтров отчёта ([`FilterSet`]) дополнительно проверяет
//! уникальность имён полей.
//!
//! ```rust,ignore
//! let filters = FilterSet::new(vec![
//!     FilterDescriptor::builder("from_date", "From Date", FilterFieldType::Date)
//!         .default_date(DynamicDate::MonthsFromToday(-1))
//!         .required()
//!         .build()?,
//! ])?;
//! ```

mod defaults;
mod descriptor;
mod field_type;
mod link;
mod set;
mod validation;

pub use defaults::{DefaultsContext, DynamicDate, FilterDefault};
pub use descriptor::{FilterDescriptor, FilterDescriptorBuilder, FilterOptions, SelectOption};
pub use field_type::FilterFieldType;
pub use link::{LinkSearchQuery, LinkSuggestion};
pub use set::{FilterSet, FilterValues};
pub use validation::DescriptorError;
