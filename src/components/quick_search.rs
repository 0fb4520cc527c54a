use std::cell::RefCell;
use std::rc::Rc;

use serde_json::json;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_hooks::prelude::*;
use yew_icons::{Icon, IconId};

use crate::api::{Client, ListApi};
use crate::config::AppConfig;
use crate::debounce::DebounceTimer;
use crate::pager::LatestOnly;
use crate::types::QuickSearchHit;
use crate::{dom, log};

/// Dashboard "add to list" search box with a results dropdown.
#[function_component(QuickSearch)]
pub fn quick_search() -> Html {
    let cfg = use_context::<Rc<AppConfig>>().unwrap_or_default();
    let hits = use_state(Vec::<QuickSearchHit>::new);
    let open = use_state(|| false);
    let timer = use_mut_ref(DebounceTimer::default);
    let seq = use_mut_ref(LatestOnly::default);
    let container = use_node_ref();

    {
        let open = open.clone();
        use_click_away(container.clone(), move |_: Event| open.set(false));
    }

    let oninput = {
        let hits = hits.clone();
        let open = open.clone();
        let timer = timer.clone();
        let seq = seq.clone();
        let cfg = cfg.clone();
        Callback::from(move |e: InputEvent| {
            let q = e.target_unchecked_into::<web_sys::HtmlInputElement>().value();
            let q = q.trim().to_string();
            if q.chars().count() < cfg.min_quick_search_len {
                timer.borrow_mut().cancel();
                seq.borrow_mut().issue();
                open.set(false);
                return;
            }
            let hits = hits.clone();
            let open = open.clone();
            let seq = seq.clone();
            timer.borrow_mut().schedule(cfg.quick_search_debounce_ms, move || {
                run_search(q, seq, hits, open);
            });
        })
    };

    let on_pick = {
        let cfg = cfg.clone();
        Callback::from(move |record_id: u64| {
            let login = cfg.login_path.clone();
            spawn_local(async move {
                match Client.add_to_list(record_id).await {
                    Ok(()) => {
                        log::info("list_add", json!({ "record_id": record_id }));
                        dom::reload();
                    }
                    Err(err) => dom::surface("list_add_failed", &err, &login),
                }
            });
        })
    };

    html! {
        <div class="quick-search" ref={container}>
            <div class="search-input">
                <Icon icon_id={IconId::LucideSearch} width={"16"} height={"16"} />
                <input type="text" placeholder="Add to your list..." {oninput} />
            </div>
            if *open {
                <ul class="search-results">
                    if hits.is_empty() {
                        <li class="empty">{"No results"}</li>
                    }
                    {
                        for hits.iter().map(|hit| {
                            let onclick = {
                                let on_pick = on_pick.clone();
                                let id = hit.id;
                                Callback::from(move |_: MouseEvent| on_pick.emit(id))
                            };
                            let thumb = match hit.image.as_deref() {
                                Some(url) if !url.trim().is_empty() => url.to_string(),
                                _ => cfg.thumb_placeholder.clone(),
                            };
                            html! {
                                <li class="search-hit" key={hit.id} {onclick}>
                                    <img src={thumb} alt="" />
                                    <span class="hit-title">{ &hit.title }</span>
                                    if let Some(kind) = &hit.kind {
                                        <span class="hit-type">{ kind }</span>
                                    }
                                </li>
                            }
                        })
                    }
                </ul>
            }
        </div>
    }
}

fn run_search(
    q: String,
    seq: Rc<RefCell<LatestOnly>>,
    hits: UseStateHandle<Vec<QuickSearchHit>>,
    open: UseStateHandle<bool>,
) {
    let ticket = seq.borrow_mut().issue();
    spawn_local(async move {
        let result = Client.quick_search(&q).await;
        if !seq.borrow().is_latest(ticket) {
            log::debug("quick_search_stale", json!({ "q": q }));
            return;
        }
        match result {
            Ok(found) => {
                hits.set(found);
                open.set(true);
            }
            Err(err) => {
                log::error("quick_search_failed", json!({ "q": q, "error": err.to_string() }));
            }
        }
    });
}
