//! Поля фильтров отчёта.
//!
//! Один компонент на описание фильтра; значение пишется в общий
//! `RwSignal<FilterValues>` по `field_name`.

use contracts::shared::report_filter::{
    FilterDescriptor, FilterFieldType, FilterValues, LinkSuggestion,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api;
use super::display_mode::{FILTER_LABEL_CLASS, FILTER_WRAPPER_CLASS};

#[component]
pub fn FilterControl(descriptor: FilterDescriptor, values: RwSignal<FilterValues>) -> impl IntoView {
    let field = descriptor.field_name().to_string();
    let style = descriptor
        .width()
        .map(|w| format!("width: {}px;", w))
        .unwrap_or_default();

    let current = {
        let field = field.clone();
        move || values.with(|v| v.get(&field).cloned().unwrap_or_default())
    };
    let set = {
        let field = field.clone();
        move |value: String| {
            values.update(|v| {
                v.insert(field.clone(), value);
            })
        }
    };

    let control = match descriptor.field_type() {
        FilterFieldType::Date => view! {
            <input
                type="date"
                class="form__input"
                data-fieldname=field.clone()
                style=style
                prop:value=current
                on:change=move |ev| set(event_target_value(&ev))
            />
        }
        .into_any(),
        FilterFieldType::Select => {
            let choices = descriptor
                .options()
                .map(|o| o.choices())
                .unwrap_or_default();
            view! {
                <select
                    class="form__select"
                    data-fieldname=field.clone()
                    style=style
                    on:change=move |ev| set(event_target_value(&ev))
                >
                    {choices
                        .into_iter()
                        .map(|choice| {
                            let current = current.clone();
                            let value = choice.value.clone();
                            let is_selected = move || current() == value;
                            view! {
                                <option value=choice.value selected=is_selected>
                                    {choice.label}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            }
            .into_any()
        }
        FilterFieldType::Link => {
            let target = descriptor.link_target().unwrap_or_default().to_string();
            view! { <LinkInput field=field.clone() target=target style=style values=values /> }
                .into_any()
        }
        FilterFieldType::Check => view! {
            <input
                type="checkbox"
                class="form__checkbox"
                data-fieldname=field.clone()
                prop:checked=move || current() == "1"
                on:change=move |ev| {
                    set(if event_target_checked(&ev) { "1" } else { "0" }.to_string())
                }
            />
        }
        .into_any(),
        FilterFieldType::Int => view! {
            <input
                type="number"
                step="1"
                class="form__input"
                data-fieldname=field.clone()
                style=style
                prop:value=current
                on:change=move |ev| set(event_target_value(&ev))
            />
        }
        .into_any(),
        FilterFieldType::Data => view! {
            <input
                type="text"
                class="form__input"
                data-fieldname=field.clone()
                style=style
                prop:value=current
                on:change=move |ev| set(event_target_value(&ev))
            />
        }
        .into_any(),
    };

    view! {
        <div class=FILTER_WRAPPER_CLASS>
            <label class=FILTER_LABEL_CLASS>
                {descriptor.label().to_string()}
                {descriptor.is_required().then(|| view! { <span class="text-danger">" *"</span> })}
            </label>
            {control}
        </div>
    }
}

/// Номер последнего запроса подсказок: ответ на устаревший запрос
/// не должен перезаписать более свежие подсказки
#[derive(Debug, Clone, Copy, Default)]
struct LatestRequest {
    current: u64,
}

impl LatestRequest {
    fn begin(&mut self) -> u64 {
        self.current += 1;
        self.current
    }

    fn is_latest(&self, seq: u64) -> bool {
        self.current == seq
    }
}

/// Поле Link: ввод текста и подсказки из ERP через `<datalist>`
#[component]
fn LinkInput(
    field: String,
    target: String,
    style: String,
    values: RwSignal<FilterValues>,
) -> impl IntoView {
    let suggestions = RwSignal::new(Vec::<LinkSuggestion>::new());
    let list_id = format!("link-options-{}", field);
    let target = StoredValue::new(target);
    let latest = StoredValue::new(LatestRequest::default());

    let current = {
        let field = field.clone();
        move || values.with(|v| v.get(&field).cloned().unwrap_or_default())
    };

    let on_input = {
        let field = field.clone();
        move |ev: leptos::ev::Event| {
            let txt = event_target_value(&ev);
            values.update(|v| {
                v.insert(field.clone(), txt.clone());
            });
            let doctype = target.get_value();
            let Some(seq) = latest.try_update_value(|l| l.begin()) else {
                return;
            };
            spawn_local(async move {
                let outcome = api::search_link(&doctype, &txt).await;
                if !latest.with_value(|l| l.is_latest(seq)) {
                    return;
                }
                match outcome {
                    Ok(items) => suggestions.set(items),
                    Err(e) => log::error!("link search for {} failed: {}", doctype, e),
                }
            });
        }
    };

    view! {
        <input
            type="text"
            class="form__input"
            autocomplete="off"
            list=list_id.clone()
            data-fieldname=field
            style=style
            prop:value=current
            on:input=on_input
        />
        <datalist id=list_id>
            <For
                each=move || suggestions.get()
                key=|s| s.value.clone()
                children=|s| {
                    let label = s.display();
                    view! { <option value=s.value>{label}</option> }
                }
            />
        </datalist>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_request_applies() {
        let mut latest = LatestRequest::default();
        let first = latest.begin();
        let second = latest.begin();
        assert!(!latest.is_latest(first));
        assert!(latest.is_latest(second));

        let third = latest.begin();
        assert!(!latest.is_latest(second));
        assert!(latest.is_latest(third));
    }
}
