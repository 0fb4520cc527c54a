use yew::prelude::*;
use yew_icons::{Icon, IconId};

use crate::list::view::Chip;

#[derive(Properties, PartialEq)]
pub struct ChipBarProps {
    pub chips: Vec<Chip>,
    pub on_remove: Callback<Chip>,
    pub on_clear: Callback<()>,
}

/// Active filters as removable tokens, plus "Clear all".
#[function_component(ChipBar)]
pub fn chip_bar(props: &ChipBarProps) -> Html {
    if props.chips.is_empty() {
        return html! {};
    }
    let on_clear = {
        let cb = props.on_clear.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };

    html! {
        <div class="active-filters">
            {
                for props.chips.iter().map(|chip| {
                    let onclick = {
                        let cb = props.on_remove.clone();
                        let chip = chip.clone();
                        Callback::from(move |_: MouseEvent| cb.emit(chip.clone()))
                    };
                    html! {
                        <span class="filter-chip" key={chip.key()}>
                            { chip.label() }
                            <button class="chip-remove" {onclick} title="Remove">
                                <Icon icon_id={IconId::LucideX} width={"12"} height={"12"} />
                            </button>
                        </span>
                    }
                })
            }
            <button class="link-btn" onclick={on_clear}>{"Clear all"}</button>
        </div>
    }
}
