//! Реестр вкладок: ключ → заголовок и содержимое.
//!
//! Отчёты берутся из реестра `contracts::dashboards`, ключ вкладки
//! совпадает с кодом отчёта.

use contracts::dashboards::all_reports;
use leptos::prelude::*;

use crate::dashboards::ReportPage;
use crate::usecases::u510_sync_customers_from_excel::SalesOrderPage;

/// Страница заказа покупателя с импортом клиентов
pub const SALES_ORDER_KEY: &str = "u510_sales_order";

/// Пункт меню: (ключ, заголовок, иконка)
pub type MenuItem = (&'static str, &'static str, &'static str);

pub fn menu_items() -> Vec<(&'static str, Vec<MenuItem>)> {
    vec![
        (
            "Shipping",
            all_reports()
                .into_iter()
                .map(|entry| (entry.code, entry.title, "truck"))
                .collect(),
        ),
        ("Selling", vec![(SALES_ORDER_KEY, "Sales Order", "upload")]),
    ]
}

/// Заголовок вкладки; для неизвестного ключа — сам ключ
pub fn tab_label_for_key(key: &str) -> &'static str {
    if key == SALES_ORDER_KEY {
        return "Sales Order";
    }
    all_reports()
        .into_iter()
        .find(|entry| entry.code == key)
        .map(|entry| entry.title)
        .unwrap_or("Unknown page")
}

pub fn render_tab_content(key: &str) -> AnyView {
    match key {
        SALES_ORDER_KEY => view! { <SalesOrderPage /> }.into_any(),
        code => {
            let code = code.to_string();
            view! { <ReportPage code=code /> }.into_any()
        }
    }
}
