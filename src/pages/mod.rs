pub mod admin;
pub mod dashboard;
pub mod search;

use yew::functional::UseStateHandle;

use crate::modal::{Keyed, ModalEffect, ModalEvent, ModalState};

/// Run one modal transition against a state handle, returning its effect.
pub(crate) fn step<T>(modal: &UseStateHandle<ModalState<T>>, event: ModalEvent<T>) -> Option<ModalEffect>
where
    T: Keyed + Clone + 'static,
{
    let (next, effect) = (**modal).clone().transition(event);
    modal.set(next);
    effect
}
