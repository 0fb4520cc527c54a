//! Edit modal draft and its validation.

use crate::types::{ListItem, ListUpdate, MediaKind, Status};

/// Form values as typed; numbers stay text until submit.
#[derive(Debug, Clone, PartialEq)]
pub struct EditDraft {
    pub kind: MediaKind,
    pub status: Status,
    pub current: String,
    pub score: String,
    pub notes: String,
}

impl EditDraft {
    pub fn from_item(item: &ListItem) -> Self {
        let kind = item.kind();
        Self {
            kind,
            status: item.status.for_kind(kind),
            current: item.current.to_string(),
            score: item.score.map(|s| s.to_string()).unwrap_or_default(),
            notes: item.notes.clone(),
        }
    }

    pub fn status_choices(&self) -> [Status; 4] {
        Status::choices(self.kind)
    }

    /// Payload for `POST /list/update/<id>`, or the message to alert.
    pub fn to_update(&self) -> Result<ListUpdate, String> {
        let current = match self.current.trim() {
            "" => 0,
            text => text
                .parse::<u32>()
                .map_err(|_| "Progress must be a whole number of 0 or more.".to_string())?,
        };
        let user_score = match self.score.trim() {
            "" => None,
            text => match text.parse::<u8>() {
                Ok(s) if s <= 10 => Some(s),
                _ => return Err("Score must be between 0 and 10.".into()),
            },
        };
        Ok(ListUpdate {
            status: self.status,
            current_chapter: current,
            user_score,
            notes: self.notes.trim().to_string(),
            silent: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::testing::item;

    #[test]
    fn draft_uses_the_vocabulary_of_its_kind() {
        let mut anime = item(1, "Frieren");
        anime.record_type = "Anime".into();
        anime.status = Status::Reading;
        let draft = EditDraft::from_item(&anime);
        assert_eq!(draft.status, Status::Watching);
        assert!(draft.status_choices().contains(&Status::Watching));
        assert!(!draft.status_choices().contains(&Status::Reading));
    }

    #[test]
    fn valid_draft_becomes_update() {
        let mut it = item(2, "Omniscient Reader");
        it.current = 3;
        it.score = Some(9);
        let mut draft = EditDraft::from_item(&it);
        draft.current = " 12 ".into();
        draft.notes = " reread ".into();
        let update = draft.to_update().unwrap();
        assert_eq!(update.current_chapter, 12);
        assert_eq!(update.user_score, Some(9));
        assert_eq!(update.notes, "reread");
        assert!(!update.silent);
    }

    #[test]
    fn blank_score_is_left_out_of_the_payload() {
        let mut it = item(3, "x");
        it.score = Some(6);
        let mut draft = EditDraft::from_item(&it);
        draft.score = "  ".into();
        let update = draft.to_update().unwrap();
        assert_eq!(update.user_score, None);
        let body = serde_json::to_value(&update).unwrap();
        assert!(body.get("user_score").is_none());
    }

    #[test]
    fn out_of_range_values_are_refused() {
        let mut draft = EditDraft::from_item(&item(4, "x"));
        draft.score = "11".into();
        assert_eq!(draft.to_update().unwrap_err(), "Score must be between 0 and 10.");
        draft.score = "7".into();
        draft.current = "-1".into();
        assert!(draft.to_update().is_err());
        draft.current = "two".into();
        assert!(draft.to_update().is_err());
    }
}
