//! The dashboard's filter, sort and render pipeline.
//!
//! `ListState` owns the items and every control value; each `ListAction` is
//! committed in one synchronous step, after which `view()` re-derives what is
//! shown. The Yew reducer in `pages::dashboard` is the only caller that
//! mutates it.

pub mod edit;
pub mod filter;
pub mod sort;
pub mod view;

use std::collections::BTreeSet;

use crate::types::{split_joined, ListItem, ListUpdate};
use filter::{Category, FilterState, StatusFilter};
use sort::SortSpec;
use view::{Chip, ListView};

/// Distinct values present in the list, for the filter controls.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterOptions {
    pub tags: Vec<String>,
    pub themes: Vec<String>,
    pub demographics: Vec<String>,
    pub studios: Vec<String>,
    /// Most recent first.
    pub years: Vec<i32>,
}

impl FilterOptions {
    pub fn from_items(items: &[ListItem]) -> Self {
        let mut tags = BTreeSet::new();
        let mut themes = BTreeSet::new();
        let mut demographics = BTreeSet::new();
        let mut studios = BTreeSet::new();
        let mut years = BTreeSet::new();
        for item in items {
            tags.extend(split_joined(&item.tags));
            themes.extend(split_joined(&item.themes));
            demographics.extend(split_joined(&item.demographics));
            if !item.studio.trim().is_empty() {
                studios.insert(item.studio.trim().to_string());
            }
            years.extend(item.year);
        }
        Self {
            tags: tags.into_iter().collect(),
            themes: themes.into_iter().collect(),
            demographics: demographics.into_iter().collect(),
            studios: studios.into_iter().collect(),
            years: years.into_iter().rev().collect(),
        }
    }

    pub fn values(&self, category: Category) -> &[String] {
        match category {
            Category::Tag => &self.tags,
            Category::Theme => &self.themes,
            Category::Demographic => &self.demographics,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListAction {
    SetStatus(StatusFilter),
    SetQuery(String),
    SetYear(Option<String>),
    SetStudio(Option<String>),
    Select(Category, String),
    RemoveChip(Chip),
    ClearFilters,
    SetSort(SortSpec),
    ToggleSelected(u64),
    SelectAllVisible,
    ClearSelection,
    /// A quick increment was sent; "+1" stays disabled until it settles.
    IncrementStarted(u64),
    IncrementFailed(u64),
    /// A quick increment was accepted by the server.
    Progressed { id: u64, current: u32 },
    /// Entries deleted server-side.
    Removed(Vec<u64>),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListState {
    pub items: Vec<ListItem>,
    pub filter: FilterState,
    pub sort: SortSpec,
    pub selected: BTreeSet<u64>,
    /// Ids with a quick increment in flight.
    pub pending: BTreeSet<u64>,
    pub options: FilterOptions,
}

impl ListAction {
    /// The query text box must be emptied after this action.
    pub fn clears_query(&self) -> bool {
        matches!(self, ListAction::RemoveChip(Chip::Query(_)) | ListAction::ClearFilters)
    }
}

impl ListState {
    pub fn new(items: Vec<ListItem>) -> Self {
        Self {
            options: FilterOptions::from_items(&items),
            items,
            ..Default::default()
        }
    }

    pub fn item(&self, id: u64) -> Option<&ListItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn view(&self) -> ListView {
        view::project(&self.items, &self.filter, self.sort, &self.selected, &self.pending)
    }

    pub fn apply(&mut self, action: ListAction) {
        match action {
            ListAction::SetStatus(s) => self.filter.status = s,
            ListAction::SetQuery(q) => self.filter.query = q.trim().to_string(),
            ListAction::SetYear(y) => self.filter.year = y.as_deref().and_then(filter::non_blank),
            ListAction::SetStudio(s) => self.filter.studio = s.as_deref().and_then(filter::non_blank),
            ListAction::Select(cat, value) => {
                if let Some(v) = filter::non_blank(&value) {
                    self.filter.selection_mut(cat).insert(v);
                }
            }
            ListAction::RemoveChip(chip) => view::remove_chip(&mut self.filter, &chip),
            ListAction::ClearFilters => self.filter = FilterState::default(),
            ListAction::SetSort(spec) => self.sort = spec,
            ListAction::ToggleSelected(id) => {
                if !self.selected.remove(&id) {
                    self.selected.insert(id);
                }
            }
            ListAction::SelectAllVisible => {
                let ids: Vec<u64> = self.view().cards.iter().map(|c| c.id).collect();
                self.selected.extend(ids);
            }
            ListAction::ClearSelection => self.selected.clear(),
            ListAction::IncrementStarted(id) => {
                self.pending.insert(id);
            }
            ListAction::IncrementFailed(id) => {
                self.pending.remove(&id);
            }
            ListAction::Progressed { id, current } => {
                self.pending.remove(&id);
                if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
                    item.current = current;
                }
            }
            ListAction::Removed(ids) => {
                let gone: BTreeSet<u64> = ids.into_iter().collect();
                self.items.retain(|i| !gone.contains(&i.id));
                self.selected.retain(|id| !gone.contains(id));
                self.pending.retain(|id| !gone.contains(id));
                self.options = FilterOptions::from_items(&self.items);
            }
        }
    }

    /// Selected ids in display order.
    pub fn selected_ids(&self) -> Vec<u64> {
        self.view().cards.into_iter().filter(|c| c.selected).map(|c| c.id).collect()
    }

    /// Payload for "+1"; `None` when the item is already at its total or
    /// an increment for it is still in flight.
    pub fn quick_increment(&self, id: u64) -> Option<ListUpdate> {
        let item = self.item(id)?;
        if self.pending.contains(&id) || !view::can_increment(item) {
            return None;
        }
        Some(ListUpdate {
            current_chapter: item.current + 1,
            silent: true,
            ..ListUpdate::from_item(item)
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::testing::item;
    use crate::types::Status;

    fn sample() -> ListState {
        let mut a = item(1, "Naruto");
        a.status = Status::Watching;
        a.record_type = "Anime".into();
        a.year = Some(2002);
        a.tags = "Action, Adventure".into();
        a.studio = "Pierrot".into();
        let mut b = item(2, "Solo Leveling");
        b.status = Status::Reading;
        b.current = 3;
        b.total = Some(12);
        b.year = Some(2018);
        b.tags = "Action, Fantasy".into();
        let c = item(3, "Omniscient Reader");
        ListState::new(vec![a, b, c])
    }

    #[test]
    fn options_are_distinct_and_sorted() {
        let s = sample();
        assert_eq!(s.options.tags, vec!["Action", "Adventure", "Fantasy"]);
        assert_eq!(s.options.years, vec![2018, 2002]);
        assert_eq!(s.options.studios, vec!["Pierrot"]);
    }

    #[test]
    fn every_control_change_rederives_the_view() {
        let mut s = sample();
        assert_eq!(s.view().order(), vec![1, 2, 3]);

        s.apply(ListAction::Select(Category::Tag, "action".into()));
        assert_eq!(s.view().order(), vec![1, 2]);

        s.apply(ListAction::SetSort("title-desc".parse().unwrap()));
        assert_eq!(s.view().order(), vec![2, 1]);

        s.apply(ListAction::SetStatus(StatusFilter::Only(Status::Reading)));
        assert_eq!(s.view().order(), vec![2]);

        s.apply(ListAction::RemoveChip(Chip::Status(Status::Reading)));
        assert_eq!(s.view().order(), vec![2, 1]);

        s.apply(ListAction::SetYear(Some("  ".into())));
        assert_eq!(s.filter.year, None);

        s.apply(ListAction::ClearFilters);
        assert!(s.filter.is_empty());
        assert_eq!(s.view().order(), vec![2, 3, 1]);
    }

    #[test]
    fn quick_increment_patches_one_item() {
        let mut s = sample();
        let update = s.quick_increment(2).unwrap();
        assert_eq!(update.current_chapter, 4);
        assert!(update.silent);
        assert_eq!(update.status, Status::Reading);

        s.apply(ListAction::Progressed { id: 2, current: update.current_chapter });
        let card = s.view().cards.into_iter().find(|c| c.id == 2).unwrap();
        assert_eq!(card.progress_width, Some(33));
        assert_eq!(card.progress_label, "4 / 12");
    }

    #[test]
    fn second_increment_waits_for_the_first() {
        let mut s = sample();
        let first = s.quick_increment(2).unwrap();
        s.apply(ListAction::IncrementStarted(2));
        assert_eq!(s.quick_increment(2), None);
        assert!(s.view().cards.iter().find(|c| c.id == 2).unwrap().busy);

        s.apply(ListAction::Progressed { id: 2, current: first.current_chapter });
        assert_eq!(s.quick_increment(2).unwrap().current_chapter, 5);
        assert!(!s.view().cards.iter().any(|c| c.busy));
    }

    #[test]
    fn failed_increment_frees_the_button() {
        let mut s = sample();
        s.apply(ListAction::IncrementStarted(2));
        s.apply(ListAction::IncrementFailed(2));
        assert_eq!(s.quick_increment(2).unwrap().current_chapter, 4);
        assert_eq!(s.item(2).unwrap().current, 3);
    }

    #[test]
    fn query_box_resets_only_with_its_filter() {
        assert!(ListAction::ClearFilters.clears_query());
        assert!(ListAction::RemoveChip(Chip::Query("naru".into())).clears_query());
        assert!(!ListAction::RemoveChip(Chip::Year("2002".into())).clears_query());
        assert!(!ListAction::SetQuery(String::new()).clears_query());

        let mut s = sample();
        s.apply(ListAction::SetQuery("naru".into()));
        let chip = s.view().chips.into_iter().find(|c| matches!(c, Chip::Query(_))).unwrap();
        let remove = ListAction::RemoveChip(chip);
        assert!(remove.clears_query());
        s.apply(remove);
        assert_eq!(s.filter.query, "");
        assert_eq!(s.view().order(), vec![1, 2, 3]);
    }

    #[test]
    fn quick_increment_stops_at_total() {
        let mut s = sample();
        s.apply(ListAction::Progressed { id: 2, current: 12 });
        assert_eq!(s.quick_increment(2), None);
        assert_eq!(s.quick_increment(99), None);
    }

    #[test]
    fn selection_follows_visibility_and_removal() {
        let mut s = sample();
        s.apply(ListAction::SetQuery("o".into()));
        s.apply(ListAction::SelectAllVisible);
        assert_eq!(s.selected_ids(), vec![1, 2, 3]);

        s.apply(ListAction::ToggleSelected(2));
        assert_eq!(s.selected_ids(), vec![1, 3]);

        s.apply(ListAction::Removed(vec![1]));
        assert_eq!(s.selected_ids(), vec![3]);
        assert_eq!(s.items.len(), 2);
        assert_eq!(s.options.studios, Vec::<String>::new());

        s.apply(ListAction::ClearSelection);
        assert!(s.selected.is_empty());
    }
}
