use std::cmp::Ordering;
use std::str::FromStr;

use crate::types::ListItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Original insertion order (ascending id).
    #[default]
    Insertion,
    Title,
    Score,
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: Direction,
}

impl SortSpec {
    pub const fn new(key: SortKey, direction: Direction) -> Self {
        Self { key, direction }
    }

    /// Control value, e.g. `score-desc`; insertion order is `none`.
    pub fn value(&self) -> String {
        let key = match self.key {
            SortKey::Insertion => return "none".into(),
            SortKey::Title => "title",
            SortKey::Score => "score",
            SortKey::Year => "year",
        };
        let dir = match self.direction {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        };
        format!("{key}-{dir}")
    }
}

impl FromStr for SortSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == "none" {
            return Ok(SortSpec::default());
        }
        let (key, dir) = s.split_once('-').unwrap_or((s, "asc"));
        let key = match key {
            "title" => SortKey::Title,
            "score" => SortKey::Score,
            "year" => SortKey::Year,
            other => return Err(format!("unknown sort key {other:?}")),
        };
        let direction = match dir {
            "asc" => Direction::Asc,
            "desc" => Direction::Desc,
            other => return Err(format!("unknown sort direction {other:?}")),
        };
        Ok(SortSpec { key, direction })
    }
}

#[cfg(target_arch = "wasm32")]
fn collate(a: &str, b: &str) -> Ordering {
    let locales = js_sys::Array::new();
    let options = js_sys::Object::new();
    js_sys::JsString::from(a)
        .locale_compare(b, &locales, &options)
        .cmp(&0)
}

// No ICU outside the browser; case-folded comparison is close enough for tests.
#[cfg(not(target_arch = "wasm32"))]
fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

fn compare_key(a: &ListItem, b: &ListItem, key: SortKey) -> Ordering {
    match key {
        SortKey::Insertion => a.id.cmp(&b.id),
        SortKey::Title => collate(&a.title, &b.title),
        SortKey::Score => a.score.unwrap_or(0).cmp(&b.score.unwrap_or(0)),
        SortKey::Year => a.year.unwrap_or(0).cmp(&b.year.unwrap_or(0)),
    }
}

/// Stable sort in place; ties keep their prior relative order in both directions.
pub fn sort_items(items: &mut [&ListItem], spec: SortSpec) {
    items.sort_by(|a, b| {
        let ord = compare_key(a, b, spec.key);
        match spec.direction {
            Direction::Asc => ord,
            Direction::Desc => ord.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::testing::item;
    use proptest::prelude::*;

    fn scored(id: u64, score: Option<u8>) -> ListItem {
        let mut it = item(id, &format!("item {id}"));
        it.score = score;
        it
    }

    fn ids(items: &[&ListItem]) -> Vec<u64> {
        items.iter().map(|i| i.id).collect()
    }

    #[test]
    fn parses_control_values() {
        assert_eq!("score-desc".parse::<SortSpec>().unwrap(), SortSpec::new(SortKey::Score, Direction::Desc));
        assert_eq!("title".parse::<SortSpec>().unwrap(), SortSpec::new(SortKey::Title, Direction::Asc));
        assert_eq!("".parse::<SortSpec>().unwrap(), SortSpec::default());
        assert_eq!("none".parse::<SortSpec>().unwrap(), SortSpec::default());
        assert!("popularity-desc".parse::<SortSpec>().is_err());
        assert!("year-sideways".parse::<SortSpec>().is_err());
        assert_eq!(SortSpec::new(SortKey::Year, Direction::Desc).value(), "year-desc");
        assert_eq!(SortSpec::default().value(), "none");
    }

    #[test]
    fn score_desc_keeps_equal_scores_in_place() {
        let items = [scored(1, Some(5)), scored(2, Some(8)), scored(3, Some(5))];
        let mut refs: Vec<&ListItem> = items.iter().collect();
        sort_items(&mut refs, "score-desc".parse().unwrap());
        assert_eq!(ids(&refs), vec![2, 1, 3]);
    }

    #[test]
    fn missing_numbers_sort_as_zero() {
        let items = [scored(1, Some(3)), scored(2, None), scored(3, Some(0))];
        let mut refs: Vec<&ListItem> = items.iter().collect();
        sort_items(&mut refs, SortSpec::new(SortKey::Score, Direction::Asc));
        assert_eq!(ids(&refs), vec![2, 3, 1]);
    }

    #[test]
    fn default_is_insertion_order() {
        let items = [item(3, "c"), item(1, "a"), item(2, "b")];
        let mut refs: Vec<&ListItem> = items.iter().collect();
        sort_items(&mut refs, SortSpec::default());
        assert_eq!(ids(&refs), vec![1, 2, 3]);
    }

    #[test]
    fn title_sort_ignores_case() {
        let items = [item(1, "bleach"), item(2, "Akira"), item(3, "Claymore")];
        let mut refs: Vec<&ListItem> = items.iter().collect();
        sort_items(&mut refs, SortSpec::new(SortKey::Title, Direction::Asc));
        assert_eq!(ids(&refs), vec![2, 1, 3]);
        sort_items(&mut refs, SortSpec::new(SortKey::Title, Direction::Desc));
        assert_eq!(ids(&refs), vec![3, 1, 2]);
    }

    fn arb_items() -> impl Strategy<Value = Vec<ListItem>> {
        prop::collection::vec((prop::option::of(0u8..4), prop::option::of(2000i32..2003)), 0..16)
            .prop_map(|rows| {
                rows.into_iter()
                    .enumerate()
                    .map(|(i, (score, year))| {
                        let mut it = scored(i as u64 + 1, score);
                        it.year = year;
                        it
                    })
                    .collect()
            })
    }

    fn arb_spec() -> impl Strategy<Value = SortSpec> {
        (
            prop_oneof![Just(SortKey::Insertion), Just(SortKey::Score), Just(SortKey::Year)],
            prop_oneof![Just(Direction::Asc), Just(Direction::Desc)],
        )
            .prop_map(|(key, direction)| SortSpec { key, direction })
    }

    proptest! {
        #[test]
        fn sort_is_stable(items in arb_items(), spec in arb_spec()) {
            let mut refs: Vec<&ListItem> = items.iter().collect();
            sort_items(&mut refs, spec);
            for pair in refs.windows(2) {
                if compare_key(pair[0], pair[1], spec.key) == Ordering::Equal {
                    prop_assert!(pair[0].id < pair[1].id);
                }
            }
        }

        #[test]
        fn resorting_is_idempotent(items in arb_items(), spec in arb_spec()) {
            let mut once: Vec<&ListItem> = items.iter().collect();
            sort_items(&mut once, spec);
            let mut twice = once.clone();
            sort_items(&mut twice, spec);
            prop_assert_eq!(ids(&once), ids(&twice));
        }
    }
}
