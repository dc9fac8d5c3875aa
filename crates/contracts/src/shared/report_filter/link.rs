use serde::{Deserialize, Serialize};

/// Параметры поиска для поля Link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSearchQuery {
    /// Целевая коллекция, например "Shipping Company"
    pub doctype: String,
    #[serde(default)]
    pub txt: String,
}

/// Вариант автодополнения
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSuggestion {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl LinkSuggestion {
    /// Текст для подсказки: значение и описание, если оно отличается
    pub fn display(&self) -> String {
        match self.description.as_deref().map(str::trim) {
            Some(desc) if !desc.is_empty() && desc != self.value => {
                format!("{} ({})", self.value, desc)
            }
            _ => self.value.clone(),
        }
    }
}
