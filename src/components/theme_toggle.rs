use std::rc::Rc;

use yew::prelude::*;
use yew_hooks::prelude::*;
use yew_icons::{Icon, IconId};

use crate::config::AppConfig;
use crate::log;
use crate::theme::{self, Theme};

/// Dark/light switch; the stored choice is applied once on mount.
#[function_component(ThemeToggle)]
pub fn theme_toggle() -> Html {
    let cfg = use_context::<Rc<AppConfig>>().unwrap_or_default();
    let current = use_state(Theme::default);

    {
        let current = current.clone();
        let key = cfg.theme_storage_key.clone();
        use_effect_once(move || {
            let stored = theme::load(&key);
            theme::apply(&key, stored);
            current.set(stored);
            || ()
        });
    }

    let onclick = {
        let current = current.clone();
        let key = cfg.theme_storage_key.clone();
        Callback::from(move |_: MouseEvent| {
            let next = current.toggled();
            theme::apply(&key, next);
            log::debug("theme_toggled", serde_json::json!({ "theme": next.as_str() }));
            current.set(next);
        })
    };

    // The icon shows the theme a click switches to.
    let icon = match *current {
        Theme::Dark => IconId::LucideSun,
        Theme::Light => IconId::LucideMoon,
    };

    html! {
        <button class="icon-btn theme-toggle" {onclick} title="Toggle theme">
            <Icon icon_id={icon} width={"20"} height={"20"} />
        </button>
    }
}
