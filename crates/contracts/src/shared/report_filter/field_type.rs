use serde::{Deserialize, Serialize};

/// Тип элемента управления фильтра
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterFieldType {
    Data,
    Date,
    Select,
    Link,
    Check,
    Int,
}

impl FilterFieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Data => "Data",
            Self::Date => "Date",
            Self::Select => "Select",
            Self::Link => "Link",
            Self::Check => "Check",
            Self::Int => "Int",
        }
    }
}
