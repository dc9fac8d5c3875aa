use crate::layout::global_context::{AppGlobalContext, Tab as TabData};
use crate::layout::tabs::TabPage;
use leptos::ev;
use leptos::prelude::*;

/// Полоса вкладок и контент открытых вкладок
#[component]
pub fn Center() -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    view! {
        <div data-zone="center" class="app-tabs" style="flex: 1; overflow: auto;">
            <div class="tabs__strip">
                <For
                    each=move || tabs_store.opened.get()
                    key=|tab| tab.key.clone()
                    children=move |tab| view! { <TabHeader tab=tab /> }
                />
            </div>
            <Show
                when=move || tabs_store.opened.with(|tabs| !tabs.is_empty())
                fallback=|| view! {
                    <div class="tabs__empty text-muted">"Pick a report or page in the menu"</div>
                }
            >
                <For
                    each=move || tabs_store.opened.get()
                    key=|tab| tab.key.clone()
                    children=move |tab| view! { <TabPage tab=tab tabs_store=tabs_store /> }
                />
            </Show>
        </div>
    }
}

#[component]
fn TabHeader(tab: TabData) -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    let key = tab.key.clone();
    let is_active = Memo::new(move |_| tabs_store.active.get().as_deref() == Some(key.as_str()));

    let key_for_click = tab.key.clone();
    let on_click = move |_| tabs_store.activate_tab(&key_for_click);

    let key_for_close = tab.key.clone();
    let on_close = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
        tabs_store.close_tab(&key_for_close);
    };

    view! {
        <div class="tab" class:active=is_active on:click=on_click>
            <span>{tab.title}</span>
            <button class="tab-close" on:click=on_close>"×"</button>
        </div>
    }
}
