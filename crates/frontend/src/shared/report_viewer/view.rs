use chrono::Local;
use contracts::shared::i18n::IdentityTranslator;
use contracts::shared::notice::{Indicator, Notice, NoticeService};
use contracts::shared::report::{ReportDescriptor, ReportRunRequest, ReportRunResponse};
use contracts::shared::report_filter::{DefaultsContext, FilterValues};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashMap;
use thaw::*;

use super::api;
use super::controls::FilterControl;
use super::display_mode::{annotate_display_mode, AnnotationOutcome, DomControlsHost};
use crate::shared::export::export_report;
use crate::shared::notice_center::use_notice_center;

/// Просмотр отчёта: панель фильтров, кнопки панели и таблица результата.
///
/// Значения по умолчанию вычисляются при открытии от сегодняшней даты
/// и пользовательских настроек (`user_defaults`, например "Company").
#[component]
pub fn ReportViewer(
    report: ReportDescriptor,
    #[prop(optional)] user_defaults: HashMap<String, String>,
) -> impl IntoView {
    let center = use_notice_center();

    let mut ctx = DefaultsContext::new(Local::now().date_naive());
    ctx.user_defaults = user_defaults;
    let values: RwSignal<FilterValues> = RwSignal::new(report.filters.initial_values(&ctx));

    let result = RwSignal::new(None::<ReportRunResponse>);
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let filters: Vec<_> = report.filters.iter().cloned().collect();
    let export_label = report.export_format.map(|f| f.action_label());
    let title = report.report_name;
    let report = StoredValue::new(report);

    // Панель фильтров смонтирована: помечаем переключатель режима отображения
    let controls_ref = NodeRef::<leptos::html::Div>::new();
    Effect::new(move |_| {
        let Some(container) = controls_ref.get() else {
            return;
        };
        let Some(field) = report.with_value(|r| r.display_mode_field().map(str::to_string)) else {
            return;
        };
        let host = DomControlsHost::new(container.into());
        if annotate_display_mode(&host, &IdentityTranslator, &field) == AnnotationOutcome::ControlAbsent {
            log::debug!("display mode control '{}' not rendered", field);
        }
    });

    let refresh = move || {
        let current = values.get_untracked();
        let (code, missing) = report.with_value(|r| {
            let missing: Vec<String> = r
                .filters
                .missing_required(&current)
                .into_iter()
                .map(str::to_string)
                .collect();
            (r.code.to_string(), missing)
        });
        if !missing.is_empty() {
            center.msgprint(
                Notice::plain(missing.join(", "))
                    .with_title("Missing Filters")
                    .with_indicator(Indicator::Orange),
            );
            return;
        }

        loading.set(true);
        error.set(None);
        let request = ReportRunRequest {
            report_code: code,
            filters: current,
        };
        spawn_local(async move {
            match api::run_report(&request).await {
                Ok(data) => result.set(Some(data)),
                Err(e) => {
                    log::error!("report {} failed: {}", request.report_code, e);
                    error.set(Some(e));
                }
            }
            loading.set(false);
        });
    };

    // Первый запуск при открытии
    Effect::new(move |_| refresh());

    let on_export = move |_: leptos::ev::MouseEvent| {
        let request = report.with_value(|r| r.export_request(&values.get_untracked()));
        if let Some(request) = request {
            if let Err(e) = export_report(&request) {
                center.msgprint(Notice::plain(e).with_title("Error").with_indicator(Indicator::Red));
            }
        }
    };

    view! {
        <div class="report-viewer">
            <div class="report-viewer__header">
                <h2 class="report-viewer__title">{title}</h2>
                <Flex gap=FlexGap::Small>
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::derive(move || loading.get())
                        on_click=move |_| refresh()
                    >
                        "Refresh"
                    </Button>
                    {export_label.map(|label| view! {
                        <Button appearance=ButtonAppearance::Secondary on_click=on_export>
                            {label}
                        </Button>
                    })}
                </Flex>
            </div>

            <div class="report-viewer__filters" node_ref=controls_ref>
                {filters
                    .into_iter()
                    .map(|descriptor| view! { <FilterControl descriptor=descriptor values=values /> })
                    .collect_view()}
            </div>

            {move || error.get().map(|e| view! {
                <MessageBar intent=MessageBarIntent::Error>
                    <MessageBarBody>{e}</MessageBarBody>
                </MessageBar>
            })}

            <Show when=move || loading.get()>
                <Spinner />
            </Show>

            {move || result.get().map(|data| render_table(report, data))}
        </div>
    }
}

fn render_table(report: StoredValue<ReportDescriptor>, data: ReportRunResponse) -> impl IntoView {
    if data.result.is_empty() {
        return view! { <div class="report-viewer__empty">"Nothing to show"</div> }.into_any();
    }

    let header = data
        .columns
        .iter()
        .map(|col| view! { <th>{col.label.clone()}</th> })
        .collect_view();

    let body = data
        .result
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let cells = data
                .columns
                .iter()
                .map(|col| {
                    let value = row.get(&col.fieldname).cloned().unwrap_or_default();
                    let html = report.with_value(|r| r.format_cell(&value, idx, col, row));
                    view! { <td inner_html=html></td> }
                })
                .collect_view();
            view! { <tr>{cells}</tr> }
        })
        .collect_view();

    view! {
        <table class="table report-viewer__table">
            <thead>
                <tr>{header}</tr>
            </thead>
            <tbody>{body}</tbody>
        </table>
    }
    .into_any()
}
