use super::registry::render_tab_content;
use crate::layout::global_context::{AppGlobalContext, Tab as TabData};
use leptos::prelude::*;

/// Контент вкладки. Создаётся один раз при открытии, неактивные
/// вкладки только скрываются, поэтому фильтры отчёта сохраняются.
#[component]
pub fn TabPage(tab: TabData, tabs_store: AppGlobalContext) -> impl IntoView {
    let key = tab.key.clone();
    let is_active = move || tabs_store.active.get().as_deref() == Some(key.as_str());

    log::debug!("TabPage created: '{}'", tab.key);
    let key_for_cleanup = tab.key.clone();
    on_cleanup(move || log::debug!("TabPage destroyed: '{}'", key_for_cleanup));

    view! {
        <div
            class="tabs__item"
            class:tabs__item--hidden=move || !is_active()
            data-tab-key=tab.key.clone()
        >
            {render_tab_content(&tab.key)}
        </div>
    }
}
