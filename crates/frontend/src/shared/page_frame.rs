//! PageFrame — корневая обёртка страницы во вкладке.
//!
//! На корневом элементе всегда есть `id` вида `"{page}--{category}"`
//! (например `"d411_shipping_company_orders--dashboard"`) и
//! `data-page-category`: по ним страницу легко найти в DOM Inspector.

use leptos::prelude::*;

/// Категория страницы
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCategory {
    /// Отчёт с фильтрами
    Dashboard,
    /// Страница действия (импорт и т.п.)
    Usecase,
}

impl PageCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageCategory::Dashboard => "dashboard",
            PageCategory::Usecase => "usecase",
        }
    }

    fn css_class(&self) -> &'static str {
        match self {
            PageCategory::Dashboard => "page page--dashboard",
            PageCategory::Usecase => "page",
        }
    }
}

#[component]
pub fn PageFrame(
    #[prop(into)] page_id: String,
    category: PageCategory,
    children: Children,
) -> impl IntoView {
    view! {
        <div id=page_id class=category.css_class() data-page-category=category.as_str()>
            {children()}
        </div>
    }
}
