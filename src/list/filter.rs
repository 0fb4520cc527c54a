use std::collections::BTreeSet;

use crate::types::{ListItem, Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

impl StatusFilter {
    /// Control value ("all" or a status label) to filter.
    pub fn from_value(value: &str) -> StatusFilter {
        Status::from_label(value).map_or(StatusFilter::All, StatusFilter::Only)
    }

    pub fn value(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(s) => s.label(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Tag,
    Theme,
    Demographic,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Tag => "Tag",
            Category::Theme => "Theme",
            Category::Demographic => "Demographic",
        }
    }
}

/// Active filter selection of the dashboard controls.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub status: StatusFilter,
    pub query: String,
    pub year: Option<String>,
    pub studio: Option<String>,
    pub tags: BTreeSet<String>,
    pub themes: BTreeSet<String>,
    pub demographics: BTreeSet<String>,
}

impl FilterState {
    pub fn selection(&self, category: Category) -> &BTreeSet<String> {
        match category {
            Category::Tag => &self.tags,
            Category::Theme => &self.themes,
            Category::Demographic => &self.demographics,
        }
    }

    pub fn selection_mut(&mut self, category: Category) -> &mut BTreeSet<String> {
        match category {
            Category::Tag => &mut self.tags,
            Category::Theme => &mut self.themes,
            Category::Demographic => &mut self.demographics,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == FilterState::default()
    }
}

/// Blank strings clear an optional filter.
pub fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn all_contained(field: &str, selected: &BTreeSet<String>) -> bool {
    selected.iter().all(|value| contains_ci(field, value))
}

pub fn status_matches(item: &ListItem, f: &FilterState) -> bool {
    match f.status {
        StatusFilter::All => true,
        StatusFilter::Only(s) => item.status == s,
    }
}

pub fn query_matches(item: &ListItem, f: &FilterState) -> bool {
    f.query.is_empty() || contains_ci(&item.title, &f.query) || contains_ci(&item.alt_title, &f.query)
}

pub fn year_matches(item: &ListItem, f: &FilterState) -> bool {
    match &f.year {
        None => true,
        Some(year) => item.year.map(|y| y.to_string()).unwrap_or_default() == *year,
    }
}

pub fn studio_matches(item: &ListItem, f: &FilterState) -> bool {
    f.studio.as_deref().map_or(true, |studio| contains_ci(&item.studio, studio))
}

pub fn categories_match(item: &ListItem, f: &FilterState) -> bool {
    all_contained(&item.tags, &f.tags)
        && all_contained(&item.themes, &f.themes)
        && all_contained(&item.demographics, &f.demographics)
}

/// Visibility of one item: the AND of every active predicate.
pub fn is_visible(item: &ListItem, f: &FilterState) -> bool {
    status_matches(item, f)
        && query_matches(item, f)
        && year_matches(item, f)
        && studio_matches(item, f)
        && categories_match(item, f)
}

pub fn filter<'a>(items: &'a [ListItem], f: &FilterState) -> Vec<&'a ListItem> {
    items.iter().filter(|item| is_visible(item, f)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::testing::item;
    use proptest::prelude::*;

    fn naruto() -> ListItem {
        let mut it = item(1, "Naruto");
        it.status = Status::Watching;
        it.year = Some(2002);
        it.studio = "Pierrot".into();
        it.tags = "Action, Adventure, Martial Arts".into();
        it.themes = "Ninja".into();
        it.demographics = "Shounen".into();
        it.alt_title = "ナルト".into();
        it
    }

    #[test]
    fn naruto_query_scenario() {
        let mut f = FilterState { query: "naru".into(), ..Default::default() };
        assert!(is_visible(&naruto(), &f));
        f.query = "bleach".into();
        assert!(!is_visible(&naruto(), &f));
    }

    #[test]
    fn query_matches_alternate_title() {
        let f = FilterState { query: "ナル".into(), ..Default::default() };
        assert!(is_visible(&naruto(), &f));
    }

    #[test]
    fn status_filter_is_exact() {
        let mut f = FilterState { status: StatusFilter::Only(Status::Watching), ..Default::default() };
        assert!(is_visible(&naruto(), &f));
        f.status = StatusFilter::Only(Status::Reading);
        assert!(!is_visible(&naruto(), &f));
        assert_eq!(StatusFilter::from_value("all"), StatusFilter::All);
        assert_eq!(StatusFilter::from_value("İzleniyor"), StatusFilter::Only(Status::Watching));
    }

    #[test]
    fn year_is_string_equality() {
        let mut f = FilterState { year: Some("2002".into()), ..Default::default() };
        assert!(is_visible(&naruto(), &f));
        f.year = Some("200".into());
        assert!(!is_visible(&naruto(), &f));
        let undated = item(2, "Untitled");
        assert!(!is_visible(&undated, &f));
    }

    #[test]
    fn studio_is_case_insensitive_containment() {
        let f = FilterState { studio: Some("pier".into()), ..Default::default() };
        assert!(is_visible(&naruto(), &f));
    }

    #[test]
    fn selections_within_a_category_are_and_combined() {
        let mut f = FilterState::default();
        f.tags.insert("action".into());
        f.tags.insert("martial".into());
        assert!(is_visible(&naruto(), &f));
        f.tags.insert("romance".into());
        assert!(!is_visible(&naruto(), &f));
    }

    #[test]
    fn categories_are_and_combined_across() {
        let mut f = FilterState::default();
        f.tags.insert("Action".into());
        f.demographics.insert("Seinen".into());
        assert!(!is_visible(&naruto(), &f));
        f.demographics.clear();
        f.themes.insert("ninja".into());
        assert!(is_visible(&naruto(), &f));
    }

    #[test]
    fn empty_item_is_visible_under_empty_filter() {
        assert!(is_visible(&item(9, ""), &FilterState::default()));
    }

    #[test]
    fn non_blank_trims() {
        assert_eq!(non_blank("  "), None);
        assert_eq!(non_blank(" 2002 "), Some("2002".into()));
    }

    fn arb_filter() -> impl Strategy<Value = FilterState> {
        (
            prop::option::of(prop::sample::select(crate::types::ALL_STATUSES.to_vec())),
            "[a-c]{0,2}",
            prop::option::of(prop_oneof![Just("2002".to_string()), Just("2010".to_string())]),
            prop::option::of("[a-c]{1,2}"),
            prop::collection::btree_set("[a-c]{1,2}", 0..3),
            prop::collection::btree_set("[a-c]{1,2}", 0..2),
        )
            .prop_map(|(status, query, year, studio, tags, themes)| FilterState {
                status: status.map_or(StatusFilter::All, StatusFilter::Only),
                query,
                year,
                studio,
                tags,
                themes,
                demographics: BTreeSet::new(),
            })
    }

    fn arb_item() -> impl Strategy<Value = ListItem> {
        (
            prop::sample::select(crate::types::ALL_STATUSES.to_vec()),
            "[a-cA-C ]{0,6}",
            prop::option::of(prop_oneof![Just(2002), Just(2010)]),
            "[a-c]{0,4}",
            "[a-c, ]{0,8}",
            "[a-c, ]{0,8}",
        )
            .prop_map(|(status, title, year, studio, tags, themes)| {
                let mut it = item(1, &title);
                it.status = status;
                it.year = year;
                it.studio = studio;
                it.tags = tags;
                it.themes = themes;
                it
            })
    }

    proptest! {
        #[test]
        fn visibility_is_conjunction_of_predicates(it in arb_item(), f in arb_filter()) {
            let expected = status_matches(&it, &f)
                && query_matches(&it, &f)
                && year_matches(&it, &f)
                && studio_matches(&it, &f)
                && categories_match(&it, &f);
            prop_assert_eq!(is_visible(&it, &f), expected);
        }

        #[test]
        fn filtering_is_idempotent(items in prop::collection::vec(arb_item(), 0..12), f in arb_filter()) {
            let once: Vec<ListItem> = filter(&items, &f).into_iter().cloned().collect();
            let twice: Vec<ListItem> = filter(&once, &f).into_iter().cloned().collect();
            prop_assert_eq!(once, twice);
        }
    }
}
