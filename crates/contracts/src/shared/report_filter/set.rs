use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use super::defaults::DefaultsContext;
use super::descriptor::FilterDescriptor;
use super::validation::DescriptorError;

/// Текущие значения фильтров: имя поля -> значение.
/// BTreeMap даёт стабильный порядок ключей в JSON.
pub type FilterValues = BTreeMap<String, String>;

/// Упорядоченный набор фильтров отчёта с уникальными именами
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSet {
    filters: Vec<FilterDescriptor>,
}

impl FilterSet {
    pub fn new(filters: Vec<FilterDescriptor>) -> Result<Self, DescriptorError> {
        let mut seen = HashSet::new();
        for f in &filters {
            if !seen.insert(f.field_name()) {
                return Err(DescriptorError::DuplicateField(f.field_name().to_string()));
            }
        }
        Ok(Self { filters })
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterDescriptor> {
        self.filters.iter()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn get(&self, field_name: &str) -> Option<&FilterDescriptor> {
        self.filters.iter().find(|f| f.field_name() == field_name)
    }

    /// Поле-переключатель режима отображения, если есть
    pub fn display_mode_field(&self) -> Option<&FilterDescriptor> {
        self.filters.iter().find(|f| f.is_display_only())
    }

    /// Начальные значения при открытии отчёта
    pub fn initial_values(&self, ctx: &DefaultsContext) -> FilterValues {
        self.filters
            .iter()
            .filter_map(|f| {
                f.initial_value(ctx)
                    .map(|v| (f.field_name().to_string(), v))
            })
            .collect()
    }

    /// Значения, отправляемые в отчёт: пустые отбрасываются,
    /// неизвестные поля игнорируются
    pub fn active_values(&self, values: &FilterValues) -> FilterValues {
        self.filters
            .iter()
            .filter_map(|f| {
                values
                    .get(f.field_name())
                    .filter(|v| !v.trim().is_empty())
                    .map(|v| (f.field_name().to_string(), v.clone()))
            })
            .collect()
    }

    /// Обязательные поля без значения (подписи, в порядке набора)
    pub fn missing_required(&self, values: &FilterValues) -> Vec<&str> {
        self.filters
            .iter()
            .filter(|f| f.is_required())
            .filter(|f| {
                values
                    .get(f.field_name())
                    .map(|v| v.trim().is_empty())
                    .unwrap_or(true)
            })
            .map(|f| f.label())
            .collect()
    }
}
