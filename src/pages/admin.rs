use std::rc::Rc;

use serde_json::json;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_icons::{Icon, IconId};

use super::step;
use crate::api::Client;
use crate::components::confirm_modal::ConfirmModal;
use crate::config::AppConfig;
use crate::debounce::DebounceTimer;
use crate::modal::{ModalEffect, ModalEvent, ModalState};
use crate::pager::LatestOnly;
use crate::types::{RecordDetail, RecordForm, RecordSummary};
use crate::{dom, log};

const RECORD_TYPES: [&str; 4] = ["Anime", "Manhwa", "Manga", "Novel"];

#[function_component(AdminPage)]
pub fn admin_page() -> Html {
    let cfg = use_context::<Rc<AppConfig>>().unwrap_or_default();
    let records = use_state(Vec::<RecordSummary>::new);
    let search = use_mut_ref(String::new);
    let seq = use_mut_ref(LatestOnly::default);
    let timer = use_mut_ref(DebounceTimer::default);
    let modal = use_state(|| ModalState::<RecordDetail>::Closed);
    let form = use_state(RecordForm::default);
    let importing = use_state(|| false);
    let import_open = use_state(|| false);
    let import_file = use_node_ref();

    // Reload the grid for the current search text.
    let reload = {
        let records = records.clone();
        let search = search.clone();
        let seq = seq.clone();
        let login = cfg.login_path.clone();
        Callback::from(move |()| {
            let q = search.borrow().clone();
            let ticket = seq.borrow_mut().issue();
            let records = records.clone();
            let seq = seq.clone();
            let login = login.clone();
            spawn_local(async move {
                let result = Client.records(&q).await;
                if !seq.borrow().is_latest(ticket) {
                    log::debug("admin_records_stale", json!({ "q": q }));
                    return;
                }
                match result {
                    Ok(found) => {
                        log::debug("admin_records", json!({ "q": q, "count": found.len() }));
                        records.set(found);
                    }
                    Err(err) => dom::surface("admin_records_failed", &err, &login),
                }
            });
        })
    };

    {
        let reload = reload.clone();
        use_effect_with((), move |_| {
            reload.emit(());
            || ()
        });
    }

    let on_search = {
        let search = search.clone();
        let timer = timer.clone();
        let reload = reload.clone();
        let delay = cfg.admin_search_debounce_ms;
        Callback::from(move |e: InputEvent| {
            *search.borrow_mut() = e.target_unchecked_into::<HtmlInputElement>().value();
            let reload = reload.clone();
            timer.borrow_mut().schedule(delay, move || reload.emit(()));
        })
    };

    let on_new = {
        let modal = modal.clone();
        let form = form.clone();
        Callback::from(move |_: MouseEvent| {
            form.set(RecordForm { record_type: "Manhwa".into(), ..Default::default() });
            step(&modal, ModalEvent::OpenCreate);
        })
    };

    let on_open = {
        let modal = modal.clone();
        let form = form.clone();
        let login = cfg.login_path.clone();
        Callback::from(move |id: u64| {
            let modal = modal.clone();
            let form = form.clone();
            let login = login.clone();
            spawn_local(async move {
                match Client.record(id).await {
                    Ok(detail) => {
                        form.set(RecordForm::from_detail(&detail));
                        step(&modal, ModalEvent::OpenEdit(detail));
                    }
                    Err(err) => dom::surface("admin_record_failed", &err, &login),
                }
            });
        })
    };

    /* ───── entry modal ───── */

    let input = |set: fn(&mut RecordForm, String)| {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let mut next = (*form).clone();
            set(&mut next, e.target_unchecked_into::<HtmlInputElement>().value());
            form.set(next);
        })
    };

    let entry_modal = if matches!(*modal, ModalState::Create | ModalState::Edit(_)) {
        let on_type = {
            let form = form.clone();
            Callback::from(move |e: Event| {
                let mut next = (*form).clone();
                next.record_type = e.target_unchecked_into::<HtmlSelectElement>().value();
                form.set(next);
            })
        };
        let on_synopsis = {
            let form = form.clone();
            Callback::from(move |e: InputEvent| {
                let mut next = (*form).clone();
                next.synopsis = e.target_unchecked_into::<HtmlTextAreaElement>().value();
                form.set(next);
            })
        };
        let on_submit = {
            let modal = modal.clone();
            let form = form.clone();
            let reload = reload.clone();
            let login = cfg.login_path.clone();
            Callback::from(move |e: SubmitEvent| {
                e.prevent_default();
                if form.original_title.trim().is_empty() {
                    dom::alert("Original title is required.");
                    return;
                }
                let id = match step(&modal, ModalEvent::Submit) {
                    Some(ModalEffect::Create) => None,
                    Some(ModalEffect::Update(id)) => Some(id),
                    _ => return,
                };
                let data = (*form).clone();
                let modal = modal.clone();
                let reload = reload.clone();
                let login = login.clone();
                spawn_local(async move {
                    match Client.save_record(id, &data).await {
                        Ok(()) => {
                            log::info("admin_record_saved", json!({ "id": id, "title": data.original_title }));
                            step(&modal, ModalEvent::Saved);
                            reload.emit(());
                        }
                        Err(err) => dom::surface("admin_record_save_failed", &err, &login),
                    }
                });
            })
        };
        let on_delete = {
            let modal = modal.clone();
            Callback::from(move |_: MouseEvent| {
                step(&modal, ModalEvent::RequestDelete);
            })
        };
        let on_close = {
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
        let heading = if modal.delete_visible() { "Edit record" } else { "New record" };

        html! {
            <div class="modal-backdrop" onclick={on_backdrop}>
                <form class="modal entry-modal" onsubmit={on_submit}>
                    <button type="button" class="icon-btn modal-close" onclick={on_close}>
                        <Icon icon_id={IconId::LucideX} width={"18"} height={"18"} />
                    </button>
                    <h2>{ heading }</h2>
                    <div class="form-group">
                        <label>{"Original title"}</label>
                        <input type="text" required=true value={form.original_title.clone()} oninput={input(|f, v| f.original_title = v)} />
                    </div>
                    <div class="form-group">
                        <label>{"English title"}</label>
                        <input type="text" value={form.english_title.clone()} oninput={input(|f, v| f.english_title = v)} />
                    </div>
                    <div class="form-group">
                        <label>{"Type"}</label>
                        <select onchange={on_type}>
                            {
                                for RECORD_TYPES.iter().map(|t| html! {
                                    <option value={*t} selected={form.record_type == *t}>{ *t }</option>
                                })
                            }
                        </select>
                    </div>
                    <div class="form-group">
                        <label>{"Image URL"}</label>
                        <input type="url" value={form.image_url.clone()} oninput={input(|f, v| f.image_url = v)} />
                    </div>
                    <div class="form-group">
                        <label>{"Synopsis"}</label>
                        <textarea value={form.synopsis.clone()} oninput={on_synopsis} />
                    </div>
                    <div class="form-group">
                        <label>{"Release year"}</label>
                        <input type="number" value={form.release_year.clone()} oninput={input(|f, v| f.release_year = v)} />
                    </div>
                    <div class="form-group">
                        <label>{"Source"}</label>
                        <input type="text" value={form.source.clone()} oninput={input(|f, v| f.source = v)} />
                    </div>
                    <div class="form-group">
                        <label>{"Studios"}</label>
                        <input type="text" value={form.studios.clone()} oninput={input(|f, v| f.studios = v)} />
                    </div>
                    <div class="form-group">
                        <label>{"Tags"}</label>
                        <input type="text" value={form.tags.clone()} oninput={input(|f, v| f.tags = v)} />
                    </div>
                    <div class="form-group">
                        <label>{"Themes"}</label>
                        <input type="text" value={form.themes.clone()} oninput={input(|f, v| f.themes = v)} />
                    </div>
                    <div class="form-group">
                        <label>{"Demographics"}</label>
                        <input type="text" value={form.demographics.clone()} oninput={input(|f, v| f.demographics = v)} />
                    </div>
                    <div class="modal-actions">
                        if modal.delete_visible() {
                            <button type="button" class="btn danger" onclick={on_delete}>
                                <Icon icon_id={IconId::LucideTrash2} width={"16"} height={"16"} />
                                {"Delete"}
                            </button>
                        }
                        <button type="submit" class="btn primary">{"Save"}</button>
                    </div>
                </form>
            </div>
        }
    } else if let ModalState::ConfirmDelete(_) = *modal {
        let on_confirm = {
            let modal = modal.clone();
            let reload = reload.clone();
            let login = cfg.login_path.clone();
            Callback::from(move |()| {
                if let Some(ModalEffect::Delete(id)) = step(&modal, ModalEvent::ConfirmDelete) {
                    let reload = reload.clone();
                    let login = login.clone();
                    spawn_local(async move {
                        match Client.delete_record(id).await {
                            Ok(()) => {
                                log::info("admin_record_deleted", json!({ "id": id }));
                                reload.emit(());
                            }
                            Err(err) => dom::surface("admin_record_delete_failed", &err, &login),
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
            <ConfirmModal
                message="This record will be permanently removed from the catalogue. This cannot be undone."
                {on_confirm}
                {on_cancel}
            />
        }
    } else {
        html! {}
    };

    /* ───── bulk import ───── */

    let on_import_open = {
        let import_open = import_open.clone();
        Callback::from(move |_: MouseEvent| import_open.set(true))
    };
    let on_import_close = {
        let import_open = import_open.clone();
        Callback::from(move |_: MouseEvent| import_open.set(false))
    };
    let on_import = {
        let import_file = import_file.clone();
        let importing = importing.clone();
        let import_open = import_open.clone();
        let reload = reload.clone();
        let login = cfg.login_path.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *importing {
                return;
            }
            let file = import_file
                .cast::<HtmlInputElement>()
                .and_then(|input| input.files())
                .and_then(|files| files.get(0));
            let Some(file) = file else {
                dom::alert("Please choose a file to import.");
                return;
            };
            importing.set(true);
            let importing = importing.clone();
            let import_open = import_open.clone();
            let reload = reload.clone();
            let login = login.clone();
            spawn_local(async move {
                let result = Client.bulk_import(&file).await;
                importing.set(false);
                match result {
                    Ok(message) => {
                        log::info("bulk_import", json!({ "file": file.name(), "message": message }));
                        dom::alert(&message);
                        import_open.set(false);
                        reload.emit(());
                    }
                    Err(err) if err.is_transport() => {
                        log::error("bulk_import_failed", json!({ "file": file.name(), "error": err.to_string() }));
                        dom::alert("Something went wrong while uploading the file.");
                    }
                    Err(err) => dom::surface("bulk_import_rejected", &err, &login),
                }
            });
        })
    };

    let import_modal = if *import_open {
        html! {
            <div class="modal-backdrop">
                <form class="modal import-modal" onsubmit={on_import}>
                    <button type="button" class="icon-btn modal-close" onclick={on_import_close}>
                        <Icon icon_id={IconId::LucideX} width={"18"} height={"18"} />
                    </button>
                    <h2>{"Bulk import"}</h2>
                    <div class="form-group">
                        <input type="file" accept=".json,.csv" ref={import_file} />
                    </div>
                    <button type="submit" class="btn primary" disabled={*importing}>
                        { if *importing { "Processing..." } else { "Import" } }
                    </button>
                </form>
            </div>
        }
    } else {
        html! {}
    };

    html! {
        <main class="container admin">
            <div class="admin-header">
                <h1>{"Catalogue"}</h1>
                <input type="text" class="admin-search" placeholder="Search records..." oninput={on_search} />
                <button class="btn primary" onclick={on_new}>
                    <Icon icon_id={IconId::LucidePlus} width={"16"} height={"16"} />
                    {"New record"}
                </button>
                <button class="btn" onclick={on_import_open}>
                    <Icon icon_id={IconId::LucideUpload} width={"16"} height={"16"} />
                    {"Bulk import"}
                </button>
            </div>
            <section class="records-grid">
                if records.is_empty() {
                    <p class="empty">{"No records found."}</p>
                }
                {
                    for records.iter().map(|r| {
                        let onclick = {
                            let on_open = on_open.clone();
                            let id = r.id;
                            Callback::from(move |_: MouseEvent| on_open.emit(id))
                        };
                        html! {
                            <div class="record-card" key={r.id} {onclick}>
                                <img src={cfg.image_or_placeholder(r.image.as_deref())} alt={r.title.clone()} loading="lazy" />
                                <div class="card-title">{ &r.title }</div>
                            </div>
                        }
                    })
                }
            </section>
            { entry_modal }
            { import_modal }
        </main>
    }
}
