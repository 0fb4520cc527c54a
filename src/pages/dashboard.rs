use std::rc::Rc;

use serde_json::json;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_icons::{Icon, IconId};

use super::step;
use crate::api::{Client, ListApi};
use crate::batch::{self, CancelToken};
use crate::components::chips::ChipBar;
use crate::components::confirm_modal::ConfirmModal;
use crate::components::list_card::ListCard;
use crate::components::mal_import::MalImport;
use crate::components::quick_search::QuickSearch;
use crate::config::AppConfig;
use crate::debounce::DebounceTimer;
use crate::list::edit::EditDraft;
use crate::list::filter::{Category, StatusFilter};
use crate::list::sort::SortSpec;
use crate::list::{ListAction, ListState};
use crate::modal::{ModalEffect, ModalEvent, ModalState};
use crate::types::{ListItem, Status, ALL_STATUSES};
use crate::{dom, log};

impl Reducible for ListState {
    type Action = ListAction;

    fn reduce(self: Rc<Self>, action: ListAction) -> Rc<Self> {
        log::debug("list_action", json!({ "action": format!("{action:?}") }));
        let mut next = (*self).clone();
        next.apply(action);
        next.into()
    }
}

const SORT_CHOICES: [(&str, &str); 7] = [
    ("none", "Default order"),
    ("title-asc", "Title A-Z"),
    ("title-desc", "Title Z-A"),
    ("score-desc", "Highest score"),
    ("score-asc", "Lowest score"),
    ("year-desc", "Newest first"),
    ("year-asc", "Oldest first"),
];

/* ───────────────────────── component ───────────────────────── */

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let cfg = use_context::<Rc<AppConfig>>().unwrap_or_default();
    let state = use_reducer(|| {
        let items: Vec<ListItem> = dom::embedded_json("list-data").unwrap_or_default();
        log::info("list_loaded", json!({ "items": items.len() }));
        ListState::new(items)
    });
    let modal = use_state(|| ModalState::<ListItem>::Closed);
    let draft = use_state(|| None::<EditDraft>);
    let bulk_confirm = use_state(|| false);
    let bulk_running = use_state(|| None::<CancelToken>);
    let notice = use_state(|| None::<String>);
    let query_timer = use_mut_ref(DebounceTimer::default);
    let query_ref = use_node_ref();

    let view = state.view();

    /* ───── filter controls ───── */

    let status_button = |filter: StatusFilter, label: &'static str| {
        let class = classes!("status-btn", (state.filter.status == filter).then_some("active"));
        let state = state.clone();
        let onclick = Callback::from(move |_: MouseEvent| state.dispatch(ListAction::SetStatus(filter)));
        html! { <button {class} {onclick}>{ label }</button> }
    };

    let on_query = {
        let state = state.clone();
        let timer = query_timer.clone();
        let delay = cfg.filter_debounce_ms;
        Callback::from(move |e: InputEvent| {
            let q = e.target_unchecked_into::<HtmlInputElement>().value();
            let state = state.clone();
            timer.borrow_mut().schedule(delay, move || state.dispatch(ListAction::SetQuery(q)));
        })
    };

    let on_year = {
        let state = state.clone();
        Callback::from(move |e: Event| {
            let v = e.target_unchecked_into::<HtmlSelectElement>().value();
            state.dispatch(ListAction::SetYear(Some(v)));
        })
    };

    let on_studio = {
        let state = state.clone();
        Callback::from(move |e: Event| {
            let v = e.target_unchecked_into::<HtmlSelectElement>().value();
            state.dispatch(ListAction::SetStudio(Some(v)));
        })
    };

    let on_sort = {
        let state = state.clone();
        Callback::from(move |e: Event| {
            let v = e.target_unchecked_into::<HtmlSelectElement>().value();
            match v.parse::<SortSpec>() {
                Ok(spec) => state.dispatch(ListAction::SetSort(spec)),
                Err(err) => log::warn("sort_invalid", json!({ "value": v, "error": err })),
            }
        })
    };

    // Multi-value categories: picking an option adds a chip and resets the select.
    let category_select = |cat: Category| {
        let onchange = {
            let state = state.clone();
            Callback::from(move |e: Event| {
                let select = e.target_unchecked_into::<HtmlSelectElement>();
                let v = select.value();
                select.set_value("");
                state.dispatch(ListAction::Select(cat, v));
            })
        };
        let chosen = state.filter.selection(cat);
        html! {
            <select class="filter-select" {onchange}>
                <option value="" selected=true>{ format!("{}...", cat.label()) }</option>
                {
                    for state.options.values(cat).iter().filter(|v| !chosen.contains(*v)).map(|v| html! {
                        <option value={v.clone()}>{ v }</option>
                    })
                }
            </select>
        }
    };

    // Actions that drop the query also empty the box and any pending keystrokes.
    let filter_reset = {
        let state = state.clone();
        let timer = query_timer.clone();
        let query_ref = query_ref.clone();
        Callback::from(move |action: ListAction| {
            if action.clears_query() {
                timer.borrow_mut().cancel();
                if let Some(input) = query_ref.cast::<HtmlInputElement>() {
                    input.set_value("");
                }
            }
            state.dispatch(action);
        })
    };
    let on_chip_remove = filter_reset.reform(ListAction::RemoveChip);
    let on_chip_clear = filter_reset.reform(|()| ListAction::ClearFilters);

    /* ───── cards ───── */

    let on_open = {
        let state = state.clone();
        let modal = modal.clone();
        let draft = draft.clone();
        Callback::from(move |id: u64| {
            if let Some(item) = state.item(id).cloned() {
                draft.set(Some(EditDraft::from_item(&item)));
                step(&modal, ModalEvent::OpenEdit(item));
            }
        })
    };

    let on_increment = {
        let state = state.clone();
        let login = cfg.login_path.clone();
        Callback::from(move |id: u64| {
            let Some(update) = state.quick_increment(id) else {
                log::debug("quick_increment_refused", json!({ "id": id }));
                return;
            };
            state.dispatch(ListAction::IncrementStarted(id));
            let state = state.clone();
            let login = login.clone();
            spawn_local(async move {
                match Client.update_entry(id, &update).await {
                    Ok(()) => {
                        log::info("quick_increment", json!({ "id": id, "current": update.current_chapter }));
                        state.dispatch(ListAction::Progressed { id, current: update.current_chapter });
                    }
                    Err(err) => {
                        state.dispatch(ListAction::IncrementFailed(id));
                        dom::surface("quick_increment_failed", &err, &login);
                    }
                }
            });
        })
    };

    let on_toggle = {
        let state = state.clone();
        Callback::from(move |id: u64| state.dispatch(ListAction::ToggleSelected(id)))
    };

    /* ───── bulk delete ───── */

    let on_select_all = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| state.dispatch(ListAction::SelectAllVisible))
    };
    let on_clear_selection = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| state.dispatch(ListAction::ClearSelection))
    };
    let on_bulk_request = {
        let bulk_confirm = bulk_confirm.clone();
        Callback::from(move |_: MouseEvent| bulk_confirm.set(true))
    };
    let on_bulk_cancel_confirm = {
        let bulk_confirm = bulk_confirm.clone();
        Callback::from(move |()| bulk_confirm.set(false))
    };
    let on_bulk_confirm = {
        let state = state.clone();
        let bulk_confirm = bulk_confirm.clone();
        let bulk_running = bulk_running.clone();
        let notice = notice.clone();
        Callback::from(move |()| {
            bulk_confirm.set(false);
            let ids = state.selected_ids();
            if ids.is_empty() {
                return;
            }
            let token = CancelToken::default();
            bulk_running.set(Some(token.clone()));
            notice.set(None);
            log::info("bulk_delete_start", json!({ "count": ids.len() }));
            let state = state.clone();
            let bulk_running = bulk_running.clone();
            let notice = notice.clone();
            spawn_local(async move {
                let report = batch::delete_each(&Client, &ids, &token).await;
                state.dispatch(ListAction::Removed(report.deleted.clone()));
                notice.set(Some(report.summary()));
                bulk_running.set(None);
            });
        })
    };
    let on_bulk_stop = {
        let bulk_running = bulk_running.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(token) = &*bulk_running {
                token.cancel();
            }
        })
    };
    let on_notice_close = {
        let notice = notice.clone();
        Callback::from(move |_: MouseEvent| notice.set(None))
    };

    /* ───── edit modal ───── */

    let edit_modal = match (&*modal, &*draft) {
        (ModalState::Edit(item), Some(d)) => {
            let on_status = {
                let draft = draft.clone();
                Callback::from(move |e: Event| {
                    let v = e.target_unchecked_into::<HtmlSelectElement>().value();
                    if let (Some(mut next), Some(status)) = ((*draft).clone(), Status::from_label(&v)) {
                        next.status = status;
                        draft.set(Some(next));
                    }
                })
            };
            let on_current = {
                let draft = draft.clone();
                Callback::from(move |e: InputEvent| {
                    if let Some(mut next) = (*draft).clone() {
                        next.current = e.target_unchecked_into::<HtmlInputElement>().value();
                        draft.set(Some(next));
                    }
                })
            };
            let on_score = {
                let draft = draft.clone();
                Callback::from(move |e: InputEvent| {
                    if let Some(mut next) = (*draft).clone() {
                        next.score = e.target_unchecked_into::<HtmlInputElement>().value();
                        draft.set(Some(next));
                    }
                })
            };
            let on_notes = {
                let draft = draft.clone();
                Callback::from(move |e: InputEvent| {
                    if let Some(mut next) = (*draft).clone() {
                        next.notes = e.target_unchecked_into::<HtmlTextAreaElement>().value();
                        draft.set(Some(next));
                    }
                })
            };
            let on_save = {
                let modal = modal.clone();
                let draft = draft.clone();
                let login = cfg.login_path.clone();
                Callback::from(move |e: SubmitEvent| {
                    e.prevent_default();
                    let Some(d) = (*draft).clone() else { return };
                    let update = match d.to_update() {
                        Ok(update) => update,
                        Err(msg) => {
                            dom::alert(&msg);
                            return;
                        }
                    };
                    if let Some(ModalEffect::Update(id)) = step(&modal, ModalEvent::Submit) {
                        let modal = modal.clone();
                        let login = login.clone();
                        spawn_local(async move {
                            match Client.update_entry(id, &update).await {
                                Ok(()) => {
                                    log::info("list_update", json!({ "id": id }));
                                    step(&modal, ModalEvent::Saved);
                                    dom::reload();
                                }
                                Err(err) => dom::surface("list_update_failed", &err, &login),
                            }
                        });
                    }
                })
            };
            let on_delete = {
                let modal = modal.clone();
                Callback::from(move |_: MouseEvent| {
                    step(&modal, ModalEvent::RequestDelete);
                })
            };
            let on_dismiss = {
                let modal = modal.clone();
                Callback::from(move |_: MouseEvent| {
                    step(&modal, ModalEvent::Dismiss);
                })
            };
            let on_backdrop = {
                let modal = modal.clone();
                Callback::from(move |e: MouseEvent| {
                    if e.target() == e.current_target() {
                        step(&modal, ModalEvent::Dismiss);
                    }
                })
            };
            let total = item.total.filter(|t| *t > 0).map(|t| format!("/ {t}")).unwrap_or_default();

            html! {
                <div class="modal-backdrop" onclick={on_backdrop}>
                    <form class="modal edit-modal" onsubmit={on_save}>
                        <h2>{ &item.title }</h2>
                        <div class="form-group">
                            <label>{"Status"}</label>
                            <select onchange={on_status}>
                                {
                                    for d.status_choices().iter().map(|s| html! {
                                        <option value={s.label()} selected={*s == d.status}>{ s.label() }</option>
                                    })
                                }
                            </select>
                        </div>
                        <div class="form-group">
                            <label>{"Progress"}</label>
                            <input type="number" min="0" value={d.current.clone()} oninput={on_current} />
                            <span class="total">{ total }</span>
                        </div>
                        <div class="form-group">
                            <label>{"Score"}</label>
                            <input type="number" min="0" max="10" value={d.score.clone()} oninput={on_score} />
                        </div>
                        <div class="form-group">
                            <label>{"Notes"}</label>
                            <textarea value={d.notes.clone()} oninput={on_notes} />
                        </div>
                        <div class="modal-actions">
                            if modal.delete_visible() {
                                <button type="button" class="btn danger" onclick={on_delete}>
                                    <Icon icon_id={IconId::LucideTrash2} width={"16"} height={"16"} />
                                    {"Delete"}
                                </button>
                            }
                            <button type="button" class="btn" onclick={on_dismiss}>{"Cancel"}</button>
                            <button type="submit" class="btn primary">
                                <Icon icon_id={IconId::LucideCheck} width={"16"} height={"16"} />
                                {"Save"}
                            </button>
                        </div>
                    </form>
                </div>
            }
        }
        (ModalState::ConfirmDelete(_), _) => {
            let on_confirm = {
                let modal = modal.clone();
                let login = cfg.login_path.clone();
                Callback::from(move |()| {
                    if let Some(ModalEffect::Delete(id)) = step(&modal, ModalEvent::ConfirmDelete) {
                        let login = login.clone();
                        spawn_local(async move {
                            match Client.delete_entry(id).await {
                                Ok(()) => {
                                    log::info("list_delete", json!({ "id": id }));
                                    dom::reload();
                                }
                                Err(err) => dom::surface("list_delete_failed", &err, &login),
                            }
                        });
                    }
                })
            };
            let on_cancel = {
                let modal = modal.clone();
                Callback::from(move |()| {
                    step(&modal, ModalEvent::CancelDelete);
                })
            };
            html! {
                <ConfirmModal message="Remove this entry from your list?" {on_confirm} {on_cancel} />
            }
        }
        _ => html! {},
    };

    /* ───── layout ───── */

    let year_value = state.filter.year.clone().unwrap_or_default();
    let studio_value = state.filter.studio.clone().unwrap_or_default();
    let sort_value = state.sort.value();
    let placeholder = AttrValue::from(cfg.card_placeholder.clone());

    html! {
        <main class="container dashboard">
            <section class="dashboard-header">
                <h1>{"My List"}</h1>
                <QuickSearch />
            </section>

            <section class="filters">
                <div class="status-filters">
                    { status_button(StatusFilter::All, "All") }
                    { for ALL_STATUSES.iter().map(|s| status_button(StatusFilter::Only(*s), s.label())) }
                </div>
                <div class="filter-row">
                    <input type="text" class="filter-query" placeholder="Filter by title..." ref={query_ref} oninput={on_query} />
                    <select class="filter-select" onchange={on_year}>
                        <option value="" selected={year_value.is_empty()}>{"Year"}</option>
                        {
                            for state.options.years.iter().map(|y| {
                                let y = y.to_string();
                                html! { <option value={y.clone()} selected={y == year_value}>{ y }</option> }
                            })
                        }
                    </select>
                    <select class="filter-select" onchange={on_studio}>
                        <option value="" selected={studio_value.is_empty()}>{"Studio"}</option>
                        {
                            for state.options.studios.iter().map(|s| html! {
                                <option value={s.clone()} selected={*s == studio_value}>{ s }</option>
                            })
                        }
                    </select>
                    { category_select(Category::Tag) }
                    { category_select(Category::Theme) }
                    { category_select(Category::Demographic) }
                    <select class="filter-select" onchange={on_sort}>
                        {
                            for SORT_CHOICES.iter().map(|(value, label)| html! {
                                <option value={*value} selected={*value == sort_value}>{ *label }</option>
                            })
                        }
                    </select>
                </div>
                <ChipBar chips={view.chips.clone()} on_remove={on_chip_remove} on_clear={on_chip_clear} />
            </section>

            <section class="bulk-bar">
                <span class="count">{ format!("{} of {} shown, {} selected", view.cards.len(), view.total, view.selected_visible) }</span>
                <button class="btn" onclick={on_select_all}>{"Select all"}</button>
                <button class="btn" onclick={on_clear_selection} disabled={view.selected_visible == 0}>{"Clear selection"}</button>
                if bulk_running.is_some() {
                    <button class="btn" onclick={on_bulk_stop}>{"Stop"}</button>
                } else {
                    <button class="btn danger" onclick={on_bulk_request} disabled={view.selected_visible == 0}>
                        <Icon icon_id={IconId::LucideTrash2} width={"16"} height={"16"} />
                        {"Delete selected"}
                    </button>
                }
            </section>

            if let Some(text) = &*notice {
                <div class="notice">
                    { text }
                    <button class="icon-btn" onclick={on_notice_close}>
                        <Icon icon_id={IconId::LucideX} width={"14"} height={"14"} />
                    </button>
                </div>
            }

            <section class="list-grid">
                if view.cards.is_empty() {
                    <p class="empty">{"No entries match the current filters."}</p>
                }
                {
                    for view.cards.iter().map(|card| html! {
                        <ListCard
                            key={card.id}
                            card={card.clone()}
                            placeholder={placeholder.clone()}
                            on_open={on_open.clone()}
                            on_increment={on_increment.clone()}
                            on_toggle={on_toggle.clone()}
                        />
                    })
                }
            </section>

            <section class="import">
                <MalImport />
            </section>

            if *bulk_confirm {
                <ConfirmModal
                    message={format!("Delete {} selected entries?", view.selected_visible)}
                    on_confirm={on_bulk_confirm}
                    on_cancel={on_bulk_cancel_confirm}
                />
            }
            { edit_modal }
        </main>
    }
}
