use serde::{Deserialize, Serialize};

use super::defaults::{DefaultsContext, DynamicDate, FilterDefault};
use super::field_type::FilterFieldType;
use super::validation::{validate_descriptor, DescriptorError};

/// Вариант выбора с отдельной подписью
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Варианты значений поля
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOptions {
    /// Значение совпадает с подписью
    Flat(Vec<String>),
    Labeled(Vec<SelectOption>),
    /// Целевая коллекция для автодополнения (для Link)
    Link(String),
}

impl FilterOptions {
    /// Допустимые значения для Select; `None` для Link
    pub fn values(&self) -> Option<Vec<&str>> {
        match self {
            FilterOptions::Flat(items) => Some(items.iter().map(String::as_str).collect()),
            FilterOptions::Labeled(items) => Some(items.iter().map(|o| o.value.as_str()).collect()),
            FilterOptions::Link(_) => None,
        }
    }

    /// Пары (значение, подпись) для отрисовки списка
    pub fn choices(&self) -> Vec<SelectOption> {
        match self {
            FilterOptions::Flat(items) => items
                .iter()
                .map(|v| SelectOption {
                    value: v.clone(),
                    label: v.clone(),
                })
                .collect(),
            FilterOptions::Labeled(items) => items.clone(),
            FilterOptions::Link(_) => Vec::new(),
        }
    }
}

/// Описание одного фильтра отчёта. Неизменяемо после сборки.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterDescriptor {
    field_name: String,
    label: String,
    field_type: FilterFieldType,
    options: Option<FilterOptions>,
    default: Option<FilterDefault>,
    required: bool,
    width: Option<u32>,
    display_only: bool,
}

impl FilterDescriptor {
    pub fn builder(
        field_name: impl Into<String>,
        label: impl Into<String>,
        field_type: FilterFieldType,
    ) -> FilterDescriptorBuilder {
        FilterDescriptorBuilder {
            inner: FilterDescriptor {
                field_name: field_name.into(),
                label: label.into(),
                field_type,
                options: None,
                default: None,
                required: false,
                width: None,
                display_only: false,
            },
        }
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn field_type(&self) -> FilterFieldType {
        self.field_type
    }

    pub fn options(&self) -> Option<&FilterOptions> {
        self.options.as_ref()
    }

    pub fn default_value(&self) -> Option<&FilterDefault> {
        self.default.as_ref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn width(&self) -> Option<u32> {
        self.width
    }

    /// Переключатель режима отображения: значение уходит в отчёт,
    /// но строки по нему не фильтруются
    pub fn is_display_only(&self) -> bool {
        self.display_only
    }

    /// Целевая коллекция для Link
    pub fn link_target(&self) -> Option<&str> {
        match &self.options {
            Some(FilterOptions::Link(target)) => Some(target.as_str()),
            _ => None,
        }
    }

    pub fn initial_value(&self, ctx: &DefaultsContext) -> Option<String> {
        self.default.as_ref().and_then(|d| d.resolve(ctx))
    }
}

pub struct FilterDescriptorBuilder {
    inner: FilterDescriptor,
}

impl FilterDescriptorBuilder {
    pub fn flat_options(mut self, values: &[&str]) -> Self {
        self.inner.options = Some(FilterOptions::Flat(
            values.iter().map(|v| v.to_string()).collect(),
        ));
        self
    }

    pub fn labeled_options(mut self, pairs: &[(&str, &str)]) -> Self {
        self.inner.options = Some(FilterOptions::Labeled(
            pairs
                .iter()
                .map(|(value, label)| SelectOption {
                    value: value.to_string(),
                    label: label.to_string(),
                })
                .collect(),
        ));
        self
    }

    pub fn link(mut self, target: impl Into<String>) -> Self {
        self.inner.options = Some(FilterOptions::Link(target.into()));
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.inner.default = Some(FilterDefault::Value(value.into()));
        self
    }

    pub fn default_date(mut self, date: DynamicDate) -> Self {
        self.inner.default = Some(FilterDefault::Date(date));
        self
    }

    pub fn user_default(mut self, key: impl Into<String>) -> Self {
        self.inner.default = Some(FilterDefault::UserDefault(key.into()));
        self
    }

    pub fn required(mut self) -> Self {
        self.inner.required = true;
        self
    }

    pub fn width(mut self, width: u32) -> Self {
        self.inner.width = Some(width);
        self
    }

    pub fn display_only(mut self) -> Self {
        self.inner.display_only = true;
        self
    }

    pub fn build(self) -> Result<FilterDescriptor, DescriptorError> {
        validate_descriptor(&self.inner)?;
        Ok(self.inner)
    }
}
