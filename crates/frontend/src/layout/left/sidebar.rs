//! Боковое меню: группы с раскрывающимися пунктами

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::menu_items;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    // все группы раскрыты при старте
    let expanded_groups = RwSignal::new(
        menu_items()
            .iter()
            .map(|(group, _)| group.to_string())
            .collect::<Vec<_>>(),
    );

    view! {
        <div class="app-sidebar__content">
            {menu_items()
                .into_iter()
                .map(|(group, items)| {
                    let group_id = group.to_string();
                    let group_for_chevron = group_id.clone();
                    let group_for_show = group_id.clone();
                    view! {
                        <div>
                            <div
                                class="app-sidebar__item"
                                style:padding-left="12px"
                                on:click=move |_| {
                                    let gid = group_id.clone();
                                    expanded_groups.update(move |groups| {
                                        if let Some(pos) = groups.iter().position(|g| g == &gid) {
                                            groups.remove(pos);
                                        } else {
                                            groups.push(gid);
                                        }
                                    });
                                }
                            >
                                <div class="app-sidebar__item-content">
                                    {icon("bar-chart")}
                                    <span>{group}</span>
                                </div>
                                <div
                                    class="app-sidebar__chevron"
                                    class:app-sidebar__chevron--expanded=move || {
                                        expanded_groups.with(|g| g.contains(&group_for_chevron))
                                    }
                                >
                                    {icon("chevron-right")}
                                </div>
                            </div>

                            <Show when=move || expanded_groups.with(|g| g.contains(&group_for_show))>
                                <div class="app-sidebar__children">
                                    {items
                                        .clone()
                                        .into_iter()
                                        .map(|(key, label, icon_name)| view! {
                                            <div
                                                class="app-sidebar__item"
                                                class:app-sidebar__item--active=move || {
                                                    ctx.active.with(|a| a.as_deref() == Some(key))
                                                }
                                                style:padding-left="10px"
                                                on:click=move |_| ctx.open_tab(key, label)
                                            >
                                                <div class="app-sidebar__item-content">
                                                    {icon(icon_name)}
                                                    <span>{label}</span>
                                                </div>
                                            </div>
                                        })
                                        .collect_view()}
                                </div>
                            </Show>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}
