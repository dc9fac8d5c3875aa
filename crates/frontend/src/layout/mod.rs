pub mod center;
pub mod global_context;
pub mod left;
pub mod tabs;

use global_context::AppGlobalContext;
use leptos::prelude::*;

/// Каркас приложения.
///
/// ```text
/// +------------------------------------------+
/// |  ☰  Shipping reports                     |
/// +------------------------------------------+
/// |  Sidebar  |          Content             |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    view! {
        <div class="app-layout">
            <div class="app-header">
                <button class="app-header__toggle" on:click=move |_| ctx.toggle_left()>"☰"</button>
                <span class="app-header__title">"Shipping reports"</span>
            </div>
            <div class="app-body">
                <left::Left>
                    <left::Sidebar />
                </left::Left>
                <div class="app-main">
                    <center::Center />
                </div>
            </div>
        </div>
    }
}
