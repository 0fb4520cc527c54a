use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ConfirmModalProps {
    pub message: AttrValue,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
    #[prop_or(AttrValue::Static("Delete"))]
    pub confirm_label: AttrValue,
}

#[function_component(ConfirmModal)]
pub fn confirm_modal(props: &ConfirmModalProps) -> Html {
    let confirm = {
        let cb = props.on_confirm.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let cancel = {
        let cb = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let backdrop = {
        let cb = props.on_cancel.clone();
        Callback::from(move |e: MouseEvent| {
            if e.target() == e.current_target() {
                cb.emit(());
            }
        })
    };

    html! {
        <div class="modal-backdrop" onclick={backdrop}>
            <div class="modal confirm-modal">
                <p>{ props.message.clone() }</p>
                <div class="modal-actions">
                    <button class="btn" onclick={cancel}>{"Cancel"}</button>
                    <button class="btn danger" onclick={confirm}>{ props.confirm_label.clone() }</button>
                </div>
            </div>
        </div>
    }
}
