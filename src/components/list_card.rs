use yew::prelude::*;
use yew_icons::{Icon, IconId};

use crate::list::view::CardView;

#[derive(Properties, PartialEq)]
pub struct ListCardProps {
    pub card: CardView,
    pub placeholder: AttrValue,
    pub on_open: Callback<u64>,
    pub on_increment: Callback<u64>,
    pub on_toggle: Callback<u64>,
}

#[function_component(ListCard)]
pub fn list_card(props: &ListCardProps) -> Html {
    let card = &props.card;
    let id = card.id;

    let open = {
        let cb = props.on_open.clone();
        Callback::from(move |_: MouseEvent| cb.emit(id))
    };
    let increment = {
        let cb = props.on_increment.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            cb.emit(id);
        })
    };
    let toggle = {
        let cb = props.on_toggle.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            cb.emit(id);
        })
    };

    let image = card.image.clone().filter(|s| !s.trim().is_empty()).map(AttrValue::from);
    let bar_style = card.progress_width.map(|w| format!("width: {w}%"));
    let class = classes!("list-card", card.selected.then_some("selected"));

    html! {
        <div {class} onclick={open} data-id={id.to_string()}>
            <input type="checkbox" class="card-select" checked={card.selected} onclick={toggle} />
            <img src={image.unwrap_or_else(|| props.placeholder.clone())} alt={card.title.clone()} loading="lazy" />
            <div class="card-body">
                <h3 class="card-title">{ &card.title }</h3>
                <span class="status-badge">{ card.status.label() }</span>
                if let Some(score) = card.score {
                    <span class="score">{ format!("★ {score}") }</span>
                }
                <div class="progress">
                    <div class="progress-bar" style={bar_style}></div>
                </div>
                <div class="progress-row">
                    <span class="progress-text">{ &card.progress_label }</span>
                    if card.can_increment {
                        <button class="icon-btn quick-increment" onclick={increment} disabled={card.busy} title="+1">
                            <Icon icon_id={IconId::LucidePlus} width={"16"} height={"16"} />
                        </button>
                    }
                </div>
            </div>
        </div>
    }
}
