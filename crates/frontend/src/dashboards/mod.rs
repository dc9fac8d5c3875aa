//! Страницы отчётов по службам доставки.
//!
//! Описания отчётов живут в `contracts::dashboards`; здесь только
//! обёртка страницы вокруг `ReportViewer`.

use contracts::dashboards::find_report;
use leptos::prelude::*;
use thaw::*;

use crate::shared::page_frame::{PageCategory, PageFrame};
use crate::shared::report_viewer::ReportViewer;

#[component]
pub fn ReportPage(#[prop(into)] code: String) -> impl IntoView {
    let page_id = format!("{}--{}", code, PageCategory::Dashboard.as_str());

    let content = match find_report(&code) {
        Some(Ok(report)) => view! { <ReportViewer report=report /> }.into_any(),
        Some(Err(e)) => {
            log::error!("report {} is misconfigured: {}", code, e);
            view! {
                <MessageBar intent=MessageBarIntent::Error>
                    <MessageBarBody>{format!("Report {} is misconfigured: {}", code, e)}</MessageBarBody>
                </MessageBar>
            }
            .into_any()
        }
        None => view! {
            <MessageBar intent=MessageBarIntent::Warning>
                <MessageBarBody>{format!("Unknown report: {}", code)}</MessageBarBody>
            </MessageBar>
        }
        .into_any(),
    };

    view! {
        <PageFrame page_id=page_id category=PageCategory::Dashboard>
            {content}
        </PageFrame>
    }
}
