//! NoticeCenter — уведомления, индикатор прогресса, блокировка формы и
//! текущий диалог как сигналы Leptos.
//!
//! Реализует `NoticeService` и `DialogService` из contracts, поэтому
//! логика сценариев (например, импорт клиентов) не знает про DOM.
//! `NoticeHost` рисует всё это один раз в корне приложения.

use contracts::shared::notice::{DialogService, DialogSpec, Notice, NoticeService};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[derive(Clone, Debug, PartialEq)]
struct ShownNotice {
    id: String,
    notice: Notice,
}

#[derive(Clone, Copy)]
pub struct NoticeCenter {
    notices: RwSignal<Vec<ShownNotice>>,
    progress: RwSignal<Option<(String, String)>>,
    frozen: RwSignal<bool>,
    dialog_spec: RwSignal<Option<DialogSpec>>,
    dialog_open: RwSignal<bool>,
}

impl NoticeCenter {
    pub fn new() -> Self {
        Self {
            notices: RwSignal::new(Vec::new()),
            progress: RwSignal::new(None),
            frozen: RwSignal::new(false),
            dialog_spec: RwSignal::new(None),
            dialog_open: RwSignal::new(false),
        }
    }

    /// Описание открытого диалога
    pub fn dialog_spec(&self) -> RwSignal<Option<DialogSpec>> {
        self.dialog_spec
    }

    /// Флаг видимости диалога, привязывается к `<Dialog open=...>`
    pub fn dialog_open(&self) -> RwSignal<bool> {
        self.dialog_open
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.get()
    }

    fn dismiss(&self, id: &str) {
        self.notices.update(|list| list.retain(|n| n.id != id));
    }
}

impl Default for NoticeCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl NoticeService for NoticeCenter {
    fn msgprint(&self, notice: Notice) {
        log::info!("msgprint: {}", notice.message);
        let id = uuid::Uuid::new_v4().to_string();
        self.notices.update(|list| list.push(ShownNotice { id, notice }));
    }

    fn show_progress(&self, title: &str, description: &str) {
        self.progress
            .set(Some((title.to_string(), description.to_string())));
    }

    fn hide_progress(&self) {
        self.progress.set(None);
    }
}

impl DialogService for NoticeCenter {
    fn open(&self, spec: &DialogSpec) {
        self.dialog_spec.set(Some(spec.clone()));
        self.dialog_open.set(true);
    }

    fn hide(&self) {
        // Диалог обычно закрывается из обработчика его же кнопки:
        // откладываем до следующего тика, чтобы не снимать DOM во время события.
        let center = *self;
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            center.dialog_open.set(false);
            center.dialog_spec.set(None);
        });
    }

    fn set_frozen(&self, frozen: bool) {
        self.frozen.set(frozen);
    }
}

pub fn use_notice_center() -> NoticeCenter {
    use_context::<NoticeCenter>().expect("NoticeCenter context not found")
}

fn indicator_intent(notice: &Notice) -> MessageBarIntent {
    use contracts::shared::notice::Indicator;
    match notice.indicator {
        Some(Indicator::Red) => MessageBarIntent::Error,
        Some(Indicator::Orange) => MessageBarIntent::Warning,
        Some(Indicator::Green) => MessageBarIntent::Success,
        Some(Indicator::Blue) | None => MessageBarIntent::Info,
    }
}

/// Стек уведомлений, индикатор прогресса и блокирующий оверлей
#[component]
pub fn NoticeHost() -> impl IntoView {
    let center = use_notice_center();

    view! {
        <div class="notice-stack">
            <For
                each=move || center.notices.get()
                key=|n| n.id.clone()
                children=move |shown| {
                    let id = shown.id.clone();
                    let intent = indicator_intent(&shown.notice);
                    let css = shown
                        .notice
                        .indicator
                        .map(|i| i.css_class())
                        .unwrap_or("");
                    view! {
                        <div class=format!("notice {}", css)>
                            <MessageBar intent=intent>
                                <MessageBarBody>
                                    {shown.notice.title.clone().map(|t| view! {
                                        <MessageBarTitle>{t}</MessageBarTitle>
                                    })}
                                    // переводы строк в тексте сохраняются
                                    <div style="white-space: pre-line;">{shown.notice.message.clone()}</div>
                                </MessageBarBody>
                                <MessageBarActions>
                                    <Button
                                        size=ButtonSize::Small
                                        appearance=ButtonAppearance::Subtle
                                        on_click=move |_| center.dismiss(&id)
                                    >
                                        "Close"
                                    </Button>
                                </MessageBarActions>
                            </MessageBar>
                        </div>
                    }
                }
            />
        </div>

        {move || center.progress.get().map(|(title, description)| view! {
            <div class="progress-panel">
                <Flex align=FlexAlign::Center gap=FlexGap::Medium>
                    <Spinner size=SpinnerSize::Small />
                    <div>
                        <div style="font-weight: 600;">{title}</div>
                        <div style="font-size: var(--font-size-sm); color: var(--color-text-secondary);">
                            {description}
                        </div>
                    </div>
                </Flex>
            </div>
        })}

        <Show when=move || center.frozen.get()>
            <div class="freeze-overlay" style="position: fixed; inset: 0; z-index: 1000; background: rgba(255,255,255,0.4); cursor: wait;"></div>
        </Show>
    }
}
