use crate::layout::global_context::AppGlobalContext;
use crate::routes::AppRoutes;
use crate::shared::notice_center::{NoticeCenter, NoticeHost};
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Provide the AppGlobalContext store to the whole app via context.
    provide_context(AppGlobalContext::new());

    // Уведомления, прогресс и диалоги для всех страниц
    provide_context(NoticeCenter::new());

    view! {
        <AppRoutes />
        <NoticeHost />
    }
}
