//! Уведомления пользователю и управление модальными окнами.
//!
//! Реализации живут во frontend (сигналы Leptos) и в тестах (запись вызовов).

use serde::{Deserialize, Serialize};

/// Цветовой индикатор уведомления
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Indicator {
    Green,
    Blue,
    Orange,
    Red,
}

impl Indicator {
    pub fn css_class(&self) -> &'static str {
        match self {
            Indicator::Green => "indicator--green",
            Indicator::Blue => "indicator--blue",
            Indicator::Orange => "indicator--orange",
            Indicator::Red => "indicator--red",
        }
    }
}

/// Модальное сообщение (аналог msgprint)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: Option<String>,
    pub message: String,
    pub indicator: Option<Indicator>,
}

impl Notice {
    pub fn plain(message: impl Into<String>) -> Self {
        Self {
            title: None,
            message: message.into(),
            indicator: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_indicator(mut self, indicator: Indicator) -> Self {
        self.indicator = Some(indicator);
        self
    }
}

pub trait NoticeService {
    fn msgprint(&self, notice: Notice);
    fn show_progress(&self, title: &str, description: &str);
    fn hide_progress(&self);
}

impl<T: NoticeService + ?Sized> NoticeService for &T {
    fn msgprint(&self, notice: Notice) {
        (**self).msgprint(notice)
    }
    fn show_progress(&self, title: &str, description: &str) {
        (**self).show_progress(title, description)
    }
    fn hide_progress(&self) {
        (**self).hide_progress()
    }
}

/// Тип поля диалога
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogFieldType {
    Attach,
    Data,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogField {
    pub fieldname: String,
    pub fieldtype: DialogFieldType,
    pub label: String,
    pub required: bool,
    /// Допустимые расширения для Attach (например, ".xlsx")
    #[serde(default)]
    pub accept: Vec<String>,
}

/// Описание модального диалога (заголовок, поля, основная кнопка)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogSpec {
    pub title: String,
    pub fields: Vec<DialogField>,
    pub primary_action_label: String,
}

pub trait DialogService {
    fn open(&self, spec: &DialogSpec);
    fn hide(&self);
    /// Блокировка всей формы на время серверного вызова
    fn set_frozen(&self, frozen: bool);
}

impl<T: DialogService + ?Sized> DialogService for &T {
    fn open(&self, spec: &DialogSpec) {
        (**self).open(spec)
    }
    fn hide(&self) {
        (**self).hide()
    }
    fn set_frozen(&self, frozen: bool) {
        (**self).set_frozen(frozen)
    }
}
