/// Entry/edit modal with its confirm-delete step.
#[derive(Debug, Clone, PartialEq)]
pub enum ModalState<T> {
    Closed,
    Create,
    Edit(T),
    ConfirmDelete(u64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModalEvent<T> {
    OpenCreate,
    OpenEdit(T),
    /// Asks for the save; the modal stays open until `Saved`.
    Submit,
    /// The server accepted the save.
    Saved,
    /// Close button or a click on the backdrop.
    Dismiss,
    RequestDelete,
    ConfirmDelete,
    CancelDelete,
}

/// Work for the page to carry out after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalEffect {
    Create,
    Update(u64),
    Delete(u64),
}

pub trait Keyed {
    fn key(&self) -> u64;
}

impl Keyed for crate::types::ListItem {
    fn key(&self) -> u64 {
        self.id
    }
}

impl Keyed for crate::types::RecordDetail {
    fn key(&self) -> u64 {
        self.id
    }
}

impl<T: Keyed> ModalState<T> {
    pub fn is_open(&self) -> bool {
        !matches!(self, ModalState::Closed)
    }

    /// The delete button only exists when editing.
    pub fn delete_visible(&self) -> bool {
        matches!(self, ModalState::Edit(_))
    }

    pub fn editing(&self) -> Option<&T> {
        match self {
            ModalState::Edit(t) => Some(t),
            _ => None,
        }
    }

    pub fn transition(self, event: ModalEvent<T>) -> (ModalState<T>, Option<ModalEffect>) {
        use ModalEvent as E;
        use ModalState as S;
        match (self, event) {
            (S::Closed, E::OpenCreate) => (S::Create, None),
            (S::Closed, E::OpenEdit(t)) => (S::Edit(t), None),
            (S::Create, E::Submit) => (S::Create, Some(ModalEffect::Create)),
            (S::Edit(t), E::Submit) => {
                let id = t.key();
                (S::Edit(t), Some(ModalEffect::Update(id)))
            }
            (S::Create | S::Edit(_), E::Saved) => (S::Closed, None),
            (S::Create | S::Edit(_), E::Dismiss) => (S::Closed, None),
            (S::Edit(t), E::RequestDelete) => (S::ConfirmDelete(t.key()), None),
            (S::ConfirmDelete(id), E::ConfirmDelete) => (S::Closed, Some(ModalEffect::Delete(id))),
            (S::ConfirmDelete(_), E::CancelDelete | E::Dismiss) => (S::Closed, None),
            (state, _) => (state, None),
        }
    }
}
