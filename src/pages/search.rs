use std::cell::RefCell;
use std::rc::Rc;

use serde_json::json;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use yew_hooks::prelude::*;
use yew_icons::{Icon, IconId};

use crate::api::{Client, ListApi, SearchQuery};
use crate::config::AppConfig;
use crate::debounce::DebounceTimer;
use crate::pager::{near_bottom, Outcome, PageRequest, Pager};
use crate::types::{RecordDetail, SearchResult};
use crate::{dom, log};

const SORT_BY: [(&str, &str); 4] = [
    ("popularity", "Popularity"),
    ("score", "Score"),
    ("title", "Title"),
    ("year", "Year"),
];

#[derive(Debug, Clone, PartialEq, Default)]
struct Results {
    items: Vec<SearchResult>,
    loading: bool,
    exhausted: bool,
}

enum ResultsAction {
    Loading,
    Page { outcome: Outcome, items: Vec<SearchResult>, has_next: bool },
    Failed,
    InList(u64),
}

impl Reducible for Results {
    type Action = ResultsAction;

    fn reduce(self: Rc<Self>, action: ResultsAction) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ResultsAction::Loading => next.loading = true,
            ResultsAction::Page { outcome, items, has_next } => {
                match outcome {
                    Outcome::Replace => next.items = items,
                    Outcome::Append => next.items.extend(items),
                    Outcome::Stale => return self,
                }
                next.loading = false;
                next.exhausted = !has_next;
            }
            ResultsAction::Failed => next.loading = false,
            ResultsAction::InList(id) => {
                for r in next.items.iter_mut().filter(|r| r.id == id) {
                    r.in_list = true;
                }
            }
        }
        next.into()
    }
}

fn fetch(req: PageRequest, query: SearchQuery, pager: Rc<RefCell<Pager>>, results: UseReducerHandle<Results>) {
    results.dispatch(ResultsAction::Loading);
    let query = SearchQuery { page: req.page, ..query };
    spawn_local(async move {
        match Client.advanced_search(&query).await {
            Ok(page) => {
                let outcome = pager.borrow_mut().complete(req, page.has_next);
                if outcome == Outcome::Stale {
                    log::debug("search_stale", json!({ "seq": req.seq, "page": req.page }));
                    return;
                }
                log::debug("search_page", json!({ "page": req.page, "results": page.results.len() }));
                results.dispatch(ResultsAction::Page { outcome, items: page.results, has_next: page.has_next });
            }
            Err(err) => {
                log::error("search_failed", json!({ "page": req.page, "error": err.to_string() }));
                pager.borrow_mut().fail(req);
                if !pager.borrow().is_loading() {
                    results.dispatch(ResultsAction::Failed);
                }
            }
        }
    });
}

fn or_na(value: Option<String>) -> String {
    value.filter(|v| !v.trim().is_empty()).unwrap_or_else(|| "N/A".into())
}

/* ───────────────────────── component ───────────────────────── */

#[function_component(SearchPage)]
pub fn search_page() -> Html {
    let cfg = use_context::<Rc<AppConfig>>().unwrap_or_default();
    let query = use_mut_ref(SearchQuery::default);
    let timer = use_mut_ref(DebounceTimer::default);
    let pager = use_mut_ref(Pager::default);
    let results = use_reducer(Results::default);
    let detail = use_state(|| None::<RecordDetail>);

    let start = {
        let query = query.clone();
        let pager = pager.clone();
        let results = results.clone();
        Callback::from(move |()| {
            let req = pager.borrow_mut().reset();
            fetch(req, query.borrow().clone(), pager.clone(), results.clone());
        })
    };

    {
        let start = start.clone();
        use_effect_with((), move |_| {
            start.emit(());
            || ()
        });
    }

    {
        let query = query.clone();
        let pager = pager.clone();
        let results = results.clone();
        let threshold = cfg.scroll_threshold_px;
        use_event_with_window("scroll", move |_: Event| {
            let Some((inner, scroll_y, body)) = dom::scroll_metrics() else { return };
            if !near_bottom(inner, scroll_y, body, threshold) {
                return;
            }
            let next = pager.borrow_mut().next();
            if let Some(req) = next {
                fetch(req, query.borrow().clone(), pager.clone(), results.clone());
            }
        });
    }

    // Text controls share one debounce; any of them restarts from page 1.
    let field = |set: fn(&mut SearchQuery, String)| {
        let query = query.clone();
        let timer = timer.clone();
        let start = start.clone();
        let delay = cfg.search_debounce_ms;
        Callback::from(move |e: InputEvent| {
            let v = e.target_unchecked_into::<HtmlInputElement>().value();
            set(&mut query.borrow_mut(), v.trim().to_string());
            let start = start.clone();
            timer.borrow_mut().schedule(delay, move || start.emit(()));
        })
    };

    let on_sort = {
        let query = query.clone();
        let timer = timer.clone();
        let start = start.clone();
        Callback::from(move |e: Event| {
            query.borrow_mut().sort_by = e.target_unchecked_into::<HtmlSelectElement>().value();
            timer.borrow_mut().cancel();
            start.emit(());
        })
    };

    let on_add = {
        let results = results.clone();
        let login = cfg.login_path.clone();
        Callback::from(move |record_id: u64| {
            let results = results.clone();
            let login = login.clone();
            spawn_local(async move {
                match Client.add_to_list(record_id).await {
                    Ok(()) => {
                        log::info("list_add", json!({ "record_id": record_id }));
                        results.dispatch(ResultsAction::InList(record_id));
                    }
                    Err(err) => dom::surface("list_add_failed", &err, &login),
                }
            });
        })
    };

    let on_open = {
        let detail = detail.clone();
        let login = cfg.login_path.clone();
        Callback::from(move |id: u64| {
            let detail = detail.clone();
            let login = login.clone();
            spawn_local(async move {
                match Client.record(id).await {
                    Ok(d) => detail.set(Some(d)),
                    Err(err) => dom::surface("record_detail_failed", &err, &login),
                }
            });
        })
    };

    let detail_modal = match &*detail {
        Some(d) => {
            let close = {
                let detail = detail.clone();
                Callback::from(move |_: MouseEvent| detail.set(None))
            };
            let backdrop = {
                let detail = detail.clone();
                Callback::from(move |e: MouseEvent| {
                    if e.target() == e.current_target() {
                        detail.set(None);
                    }
                })
            };
            let tags = d.tag_list();
            html! {
                <div class="modal-backdrop" onclick={backdrop}>
                    <div class="modal detail-modal">
                        <button class="icon-btn modal-close" onclick={close}>
                            <Icon icon_id={IconId::LucideX} width={"18"} height={"18"} />
                        </button>
                        <img src={cfg.image_or_placeholder(d.image_url.as_deref())} alt={d.original_title.clone()} />
                        <h2>{ &d.original_title }</h2>
                        if let Some(en) = d.english_title.as_ref().filter(|t| !t.trim().is_empty()) {
                            <h3 class="alt-title">{ en }</h3>
                        }
                        <p class="synopsis">{ or_na(d.synopsis.clone()) }</p>
                        <dl class="detail-meta">
                            <dt>{"Year"}</dt><dd>{ or_na(d.release_year.map(|y| y.to_string())) }</dd>
                            <dt>{"Source"}</dt><dd>{ or_na(d.source.clone()) }</dd>
                            <dt>{"Studios"}</dt><dd>{ or_na(d.studios.clone()) }</dd>
                        </dl>
                        <div class="tags">
                            if tags.is_empty() {
                                <span class="tag">{"N/A"}</span>
                            }
                            { for tags.iter().map(|t| html! { <span class="tag">{ t }</span> }) }
                        </div>
                    </div>
                </div>
            }
        }
        None => html! {},
    };

    html! {
        <main class="container search">
            <h1>{"Browse"}</h1>
            <section class="filters">
                <input type="text" placeholder="Search titles..." oninput={field(|q, v| q.q = v)} />
                <input type="text" placeholder="Studio" oninput={field(|q, v| q.studio = v)} />
                <input type="text" placeholder="Year" oninput={field(|q, v| q.year = v)} />
                <input type="text" placeholder="Tags (comma separated)" oninput={field(|q, v| q.tags = v)} />
                <input type="text" placeholder="Themes" oninput={field(|q, v| q.themes = v)} />
                <input type="text" placeholder="Demographics" oninput={field(|q, v| q.demographics = v)} />
                <select onchange={on_sort}>
                    { for SORT_BY.iter().map(|(value, label)| html! { <option value={*value}>{ *label }</option> }) }
                </select>
            </section>

            <section class="results-grid">
                {
                    for results.items.iter().map(|r| {
                        let id = r.id;
                        let open = {
                            let on_open = on_open.clone();
                            Callback::from(move |_: MouseEvent| on_open.emit(id))
                        };
                        let add = {
                            let on_add = on_add.clone();
                            Callback::from(move |e: MouseEvent| {
                                e.stop_propagation();
                                on_add.emit(id);
                            })
                        };
                        html! {
                            <div class="result-card" key={id} onclick={open}>
                                <img src={cfg.image_or_placeholder(r.image.as_deref())} alt={r.title.clone()} loading="lazy" />
                                <div class="card-body">
                                    <h3 class="card-title">{ &r.title }</h3>
                                    <div class="meta">
                                        if let Some(kind) = &r.kind { <span>{ kind }</span> }
                                        if let Some(score) = r.score { <span>{ format!("★ {score:.2}") }</span> }
                                        if let Some(eps) = r.total_episodes { <span>{ format!("{eps} eps") }</span> }
                                        if let Some(status) = &r.status { <span>{ status }</span> }
                                    </div>
                                    if r.in_list {
                                        <button class="btn in-list" disabled=true>
                                            <Icon icon_id={IconId::LucideCheck} width={"16"} height={"16"} />
                                            {"In list"}
                                        </button>
                                    } else {
                                        <button class="btn primary" onclick={add}>
                                            <Icon icon_id={IconId::LucidePlus} width={"16"} height={"16"} />
                                            {"Add"}
                                        </button>
                                    }
                                </div>
                            </div>
                        }
                    })
                }
            </section>
            if results.loading {
                <p class="loading">{"Loading..."}</p>
            } else if results.items.is_empty() {
                <p class="empty">{"No results."}</p>
            } else if results.exhausted {
                <p class="end">{"End of results."}</p>
            }
            { detail_modal }
        </main>
    }
}
