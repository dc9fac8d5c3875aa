use crate::layout::global_context::AppGlobalContext;
use crate::layout::Shell;
use leptos::prelude::*;

/// Корневой маршрут: вкладка восстанавливается из `?active=`
#[component]
pub fn AppRoutes() -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    // Runs once when the component is created.
    tabs_store.init_router_integration();

    view! { <Shell /> }
}
