use serde_json::json;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_icons::{Icon, IconId};

use crate::api::Client;
use crate::types::ImportOptions;
use crate::{dom, log};

/// MyAnimeList XML export upload.
#[function_component(MalImport)]
pub fn mal_import() -> Html {
    let file_ref = use_node_ref();
    let options = use_state(ImportOptions::default);
    let busy = use_state(|| false);
    let message = use_state(|| None::<(bool, String)>);

    let checkbox = |label: &'static str, checked: bool, set: fn(&mut ImportOptions, bool)| {
        let options = options.clone();
        let onchange = Callback::from(move |e: Event| {
            let on = e.target_unchecked_into::<web_sys::HtmlInputElement>().checked();
            let mut next = *options;
            set(&mut next, on);
            options.set(next);
        });
        html! {
            <label class="checkbox">
                <input type="checkbox" {checked} {onchange} />
                { label }
            </label>
        }
    };

    let onsubmit = {
        let file_ref = file_ref.clone();
        let options = options.clone();
        let busy = busy.clone();
        let message = message.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *busy {
                return;
            }
            let file = file_ref
                .cast::<web_sys::HtmlInputElement>()
                .and_then(|input| input.files())
                .and_then(|files| files.get(0));
            let Some(file) = file else {
                dom::alert("Please choose your MyAnimeList export file.");
                return;
            };
            let opts = *options;
            let busy = busy.clone();
            let message = message.clone();
            busy.set(true);
            spawn_local(async move {
                let result = Client.import_mal(&file, opts).await;
                busy.set(false);
                match result {
                    Ok(resp) => {
                        log::info("mal_import", json!({ "success": resp.success, "message": resp.message }));
                        message.set(Some((resp.success, resp.message)));
                        if resp.success {
                            dom::reload();
                        }
                    }
                    Err(err) if err.is_transport() => {
                        log::error("mal_import_failed", json!({ "error": err.to_string() }));
                        dom::alert("Import failed. Please try again.");
                    }
                    Err(err) => message.set(Some((false, err.to_string()))),
                }
            });
        })
    };

    html! {
        <form class="mal-import" {onsubmit}>
            <h3>{"Import from MyAnimeList"}</h3>
            <div class="form-group">
                <input type="file" accept=".xml" ref={file_ref} />
            </div>
            { checkbox("Import scores", options.import_scores, |o, v| o.import_scores = v) }
            { checkbox("Import notes", options.import_notes, |o, v| o.import_notes = v) }
            { checkbox("Import dates", options.import_dates, |o, v| o.import_dates = v) }
            <button type="submit" class="btn" disabled={*busy}>
                <Icon icon_id={IconId::LucideUpload} width={"16"} height={"16"} />
                { if *busy { "Importing..." } else { "Import" } }
            </button>
            if let Some((ok, text)) = &*message {
                <p class={if *ok { "notice success" } else { "notice error" }}>{ text }</p>
            }
        </form>
    }
}
