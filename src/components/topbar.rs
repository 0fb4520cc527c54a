use yew::prelude::*;
use yew_icons::{Icon, IconId};

use crate::app::Page;
use crate::components::theme_toggle::ThemeToggle;
use crate::log;

#[derive(Properties, PartialEq)]
pub struct TopbarProps {
    pub current: Page,
}

#[function_component(Topbar)]
pub fn topbar(props: &TopbarProps) -> Html {
    let link = |p: Page| {
        let class = if p == props.current { "nav-link active" } else { "nav-link" };
        let onclick = Callback::from(move |_: MouseEvent| {
            log::info("navigate", serde_json::json!({ "to": p.label() }));
        });
        html! { <a class={class} href={p.href()} {onclick}>{ p.label() }</a> }
    };

    html! {
        <header class="topbar">
            <a class="brand" href="/">{"Lyst"}</a>
            <nav class="nav">
                { link(Page::Dashboard) }
                { link(Page::Search) }
                { link(Page::Admin) }
            </nav>
            <a class="icon-btn" href={Page::Search.href()} title="Browse">
                <Icon icon_id={IconId::LucideSearch} width={"20"} height={"20"} />
            </a>
            <ThemeToggle />
        </header>
    }
}
