use std::cell::Cell;
use std::rc::Rc;

use serde_json::json;

use crate::api::ListApi;
use crate::error::ApiError;
use crate::log;

/// Shared stop flag for a running batch.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchReport {
    pub deleted: Vec<u64>,
    pub failed: Vec<(u64, ApiError)>,
    /// Ids never attempted because the batch was cancelled.
    pub skipped: Vec<u64>,
}

impl BatchReport {
    pub fn summary(&self) -> String {
        let mut text = format!("{} deleted", self.deleted.len());
        if !self.failed.is_empty() {
            text.push_str(&format!(", {} failed", self.failed.len()));
        }
        if !self.skipped.is_empty() {
            text.push_str(&format!(", {} cancelled", self.skipped.len()));
        }
        text
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.skipped.is_empty()
    }
}

/// Delete entries one at a time, awaiting each call before the next.
/// Nothing is rolled back: every id ends up in exactly one bucket of the report.
pub async fn delete_each<A: ListApi + ?Sized>(api: &A, ids: &[u64], cancel: &CancelToken) -> BatchReport {
    let mut report = BatchReport::default();
    for (pos, &id) in ids.iter().enumerate() {
        if cancel.is_cancelled() {
            report.skipped.extend_from_slice(&ids[pos..]);
            log::warn("bulk_delete_cancelled", json!({ "remaining": ids.len() - pos }));
            break;
        }
        match api.delete_entry(id).await {
            Ok(()) => report.deleted.push(id),
            Err(err) => {
                log::error("bulk_delete_item_failed", json!({ "id": id, "error": err.to_string() }));
                report.failed.push((id, err));
            }
        }
    }
    log::info(
        "bulk_delete_done",
        json!({ "deleted": report.deleted.len(), "failed": report.failed.len(), "skipped": report.skipped.len() }),
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::testing::item;
    use crate::list::{ListAction, ListState};
    use crate::types::{ListUpdate, QuickSearchHit};
    use std::cell::RefCell;
    use std::collections::HashSet;

    #[derive(Default)]
    struct FakeApi {
        reject: HashSet<u64>,
        calls: RefCell<Vec<u64>>,
        cancel_after_first: Option<CancelToken>,
    }

    impl ListApi for FakeApi {
        async fn add_to_list(&self, _record_id: u64) -> Result<(), ApiError> {
            Ok(())
        }

        async fn update_entry(&self, _id: u64, _update: &ListUpdate) -> Result<(), ApiError> {
            Ok(())
        }

        async fn delete_entry(&self, id: u64) -> Result<(), ApiError> {
            self.calls.borrow_mut().push(id);
            if let Some(token) = &self.cancel_after_first {
                token.cancel();
            }
            if self.reject.contains(&id) {
                return Err(ApiError::rejected(500, None));
            }
            Ok(())
        }

        async fn quick_search(&self, _q: &str) -> Result<Vec<QuickSearchHit>, ApiError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn failure_in_the_middle_does_not_stop_the_rest() {
        let api = FakeApi { reject: HashSet::from([2]), ..Default::default() };
        let mut state = ListState::new(vec![item(1, "a"), item(2, "b"), item(3, "c")]);

        let report = delete_each(&api, &[1, 2, 3], &CancelToken::default()).await;
        assert_eq!(*api.calls.borrow(), vec![1, 2, 3]);
        assert_eq!(report.deleted, vec![1, 3]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, 2);
        assert_eq!(report.summary(), "2 deleted, 1 failed");

        state.apply(ListAction::Removed(report.deleted.clone()));
        assert_eq!(state.view().order(), vec![2]);
    }

    #[tokio::test]
    async fn cancellation_skips_the_remainder() {
        let token = CancelToken::default();
        let api = FakeApi { cancel_after_first: Some(token.clone()), ..Default::default() };

        let report = delete_each(&api, &[4, 5, 6], &token).await;
        assert_eq!(report.deleted, vec![4]);
        assert_eq!(report.skipped, vec![5, 6]);
        assert!(!report.is_clean());
        assert_eq!(report.summary(), "1 deleted, 2 cancelled");
    }

    #[tokio::test]
    async fn clean_run() {
        let api = FakeApi::default();
        let report = delete_each(&api, &[1], &CancelToken::default()).await;
        assert!(report.is_clean());
        assert_eq!(report.summary(), "1 deleted");
    }
}
