use contracts::shared::i18n::IdentityTranslator;
use contracts::shared::notice::{DialogField, DialogFieldType};
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u510_sync_customers_from_excel::{
    CustomerImportWorkflow, ImportDialogState, SyncCustomersFromExcel, UploadedFile,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use wasm_bindgen::JsCast;

use super::api;
use crate::shared::notice_center::{use_notice_center, NoticeCenter};
use crate::shared::page_frame::{PageCategory, PageFrame};

type Workflow = CustomerImportWorkflow<IdentityTranslator, NoticeCenter, NoticeCenter>;

/// Кнопка "Import Shopify Customers" с диалогом загрузки файла.
///
/// Состояние диалога ведёт `CustomerImportWorkflow`; здесь только
/// загрузка файла и привязка к сигналам `NoticeCenter`.
#[component]
pub fn ImportCustomersButton() -> impl IntoView {
    let center = use_notice_center();
    let workflow = StoredValue::new(Workflow::new(IdentityTranslator, center, center));

    let uploaded = RwSignal::new(None::<UploadedFile>);
    let uploading = RwSignal::new(false);
    let field_error = RwSignal::new(None::<String>);

    // Диалог закрыт крестиком или Esc: возвращаемся в Idle
    Effect::new(move |_| {
        if !center.dialog_open().get() {
            workflow.update_value(|w| {
                if matches!(w.state(), ImportDialogState::Collecting) {
                    if let Err(e) = w.cancel() {
                        log::error!("customer import cancel: {}", e);
                    }
                }
            });
        }
    });

    let on_open = move |_: leptos::ev::MouseEvent| {
        uploaded.set(None);
        field_error.set(None);
        if let Some(Err(e)) = workflow.try_update_value(|w| w.open()) {
            log::warn!("import dialog: {}", e);
        }
    };

    let on_submit = move |_: leptos::ev::MouseEvent| {
        let file_url = uploaded.with_untracked(|f| f.as_ref().map(|f| f.file_url.clone()));
        match workflow.try_update_value(|w| w.submit(file_url.as_deref())) {
            Some(Ok(request)) => {
                field_error.set(None);
                spawn_local(async move {
                    let outcome = api::sync_customers(&request).await;
                    workflow.update_value(|w| {
                        match w.resolve(outcome) {
                            Ok(state) => log::info!("customer import finished: {}", state.name()),
                            Err(e) => log::error!("customer import: {}", e),
                        }
                        if let Err(e) = w.reset() {
                            log::error!("customer import reset: {}", e);
                        }
                    });
                });
            }
            Some(Err(e)) => field_error.set(Some(e.to_string())),
            None => {}
        }
    };

    let title = move || {
        center
            .dialog_spec()
            .with(|s| s.as_ref().map(|s| s.title.clone()).unwrap_or_default())
    };
    let primary_label = move || {
        center
            .dialog_spec()
            .with(|s| s.as_ref().map(|s| s.primary_action_label.clone()).unwrap_or_default())
    };

    view! {
        <Button
            appearance=ButtonAppearance::Secondary
            disabled=Signal::derive(move || center.is_frozen())
            on_click=on_open
        >
            {SyncCustomersFromExcel::display_name()}
        </Button>

        <Dialog open=center.dialog_open()>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>{title}</DialogTitle>
                    <DialogContent>
                        {move || {
                            center
                                .dialog_spec()
                                .get()
                                .map(|spec| {
                                    spec.fields
                                        .into_iter()
                                        .map(|field| view! {
                                            <AttachField field=field uploaded=uploaded uploading=uploading error=field_error />
                                        })
                                        .collect_view()
                                })
                        }}
                        {move || field_error.get().map(|e| view! {
                            <MessageBar intent=MessageBarIntent::Error>
                                <MessageBarBody>{e}</MessageBarBody>
                            </MessageBar>
                        })}
                    </DialogContent>
                    <DialogActions>
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=Signal::derive(move || uploading.get())
                            on_click=on_submit
                        >
                            {primary_label}
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}

/// Поле Attach: файл загружается сразу после выбора
#[component]
fn AttachField(
    field: DialogField,
    uploaded: RwSignal<Option<UploadedFile>>,
    uploading: RwSignal<bool>,
    error: RwSignal<Option<String>>,
) -> impl IntoView {
    if field.fieldtype != DialogFieldType::Attach {
        return ().into_any();
    }

    let accept = field.accept.join(",");
    let on_change = move |ev: leptos::ev::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            uploaded.set(None);
            return;
        };

        uploading.set(true);
        error.set(None);
        spawn_local(async move {
            match api::upload_file(file).await {
                Ok(file) => uploaded.set(Some(file)),
                Err(e) => {
                    uploaded.set(None);
                    error.set(Some(e));
                }
            }
            uploading.set(false);
        });
    };

    view! {
        <div class="form__group">
            <label class="form__label">
                {field.label.clone()}
                {field.required.then(|| view! { <span class="text-danger">" *"</span> })}
            </label>
            <input type="file" class="form__input" accept=accept on:change=on_change />
            {move || uploaded.get().map(|f| view! {
                <div class="text-muted">{f.file_name}</div>
            })}
            <Show when=move || uploading.get()>
                <Spinner size=SpinnerSize::Tiny />
            </Show>
        </div>
    }
    .into_any()
}

/// Заказ покупателя: панель действий с импортом клиентов
#[component]
pub fn SalesOrderPage() -> impl IntoView {
    view! {
        <PageFrame page_id="u510_sync_customers_from_excel--usecase" category=PageCategory::Usecase>
            <div class="page__header">
                <h2 class="page__title">"Sales Order"</h2>
                <Flex gap=FlexGap::Small>
                    <ImportCustomersButton />
                </Flex>
            </div>
            <div class="page__content">
                <p class="text-muted">{SyncCustomersFromExcel::description()}</p>
            </div>
        </PageFrame>
    }
}
