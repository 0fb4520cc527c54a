//! Pure projection of list state to what the dashboard shows.

use std::collections::BTreeSet;

use super::filter::{self, Category, FilterState, StatusFilter};
use super::sort::{self, SortSpec};
use crate::types::{ListItem, Status};

/// One removable token per active filter value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Chip {
    Status(Status),
    Query(String),
    Year(String),
    Studio(String),
    Value(Category, String),
}

impl Chip {
    pub fn label(&self) -> String {
        match self {
            Chip::Status(s) => s.label().to_string(),
            Chip::Query(q) => format!("\u{201c}{q}\u{201d}"),
            Chip::Year(y) => y.clone(),
            Chip::Studio(s) => format!("Studio: {s}"),
            Chip::Value(cat, v) => format!("{}: {v}", cat.label()),
        }
    }

    /// Stable key for rendering.
    pub fn key(&self) -> String {
        match self {
            Chip::Status(s) => format!("status:{}", s.label()),
            Chip::Query(q) => format!("query:{q}"),
            Chip::Year(y) => format!("year:{y}"),
            Chip::Studio(s) => format!("studio:{s}"),
            Chip::Value(cat, v) => format!("{}:{v}", cat.label()),
        }
    }
}

pub fn chips(f: &FilterState) -> Vec<Chip> {
    let mut out = Vec::new();
    if let StatusFilter::Only(s) = f.status {
        out.push(Chip::Status(s));
    }
    if !f.query.is_empty() {
        out.push(Chip::Query(f.query.clone()));
    }
    if let Some(y) = &f.year {
        out.push(Chip::Year(y.clone()));
    }
    if let Some(s) = &f.studio {
        out.push(Chip::Studio(s.clone()));
    }
    for cat in [Category::Tag, Category::Theme, Category::Demographic] {
        out.extend(f.selection(cat).iter().map(|v| Chip::Value(cat, v.clone())));
    }
    out
}

/// Clear the single filter value a chip stands for.
pub fn remove_chip(f: &mut FilterState, chip: &Chip) {
    match chip {
        Chip::Status(_) => f.status = StatusFilter::All,
        Chip::Query(_) => f.query.clear(),
        Chip::Year(_) => f.year = None,
        Chip::Studio(_) => f.studio = None,
        Chip::Value(cat, v) => {
            f.selection_mut(*cat).remove(v);
        }
    }
}

/// `floor(current / total * 100)`, capped at 100; `None` without a total.
pub fn progress_width(current: u32, total: Option<u32>) -> Option<u32> {
    match total {
        Some(t) if t > 0 => Some(((u64::from(current) * 100) / u64::from(t)).min(100) as u32),
        _ => None,
    }
}

pub fn progress_label(current: u32, total: Option<u32>) -> String {
    match total {
        Some(t) if t > 0 => format!("{current} / {t}"),
        _ => format!("{current} / ?"),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub id: u64,
    pub title: String,
    pub image: Option<String>,
    pub status: Status,
    pub score: Option<u8>,
    pub progress_label: String,
    pub progress_width: Option<u32>,
    pub can_increment: bool,
    pub selected: bool,
    /// An increment is awaiting the server.
    pub busy: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListView {
    /// Visible cards, in display order.
    pub cards: Vec<CardView>,
    /// Filtered-out ids, in insertion order.
    pub hidden: Vec<u64>,
    pub chips: Vec<Chip>,
    pub selected_visible: usize,
    pub total: usize,
}

impl ListView {
    pub fn order(&self) -> Vec<u64> {
        self.cards.iter().map(|c| c.id).collect()
    }
}

pub fn can_increment(item: &ListItem) -> bool {
    match item.total {
        Some(t) if t > 0 => item.current < t,
        _ => true,
    }
}

/// `sort(filter(items, f), spec)` plus derived card state.
pub fn project(
    items: &[ListItem],
    f: &FilterState,
    spec: SortSpec,
    selected: &BTreeSet<u64>,
    pending: &BTreeSet<u64>,
) -> ListView {
    let mut visible = filter::filter(items, f);
    sort::sort_items(&mut visible, spec);

    let visible_ids: BTreeSet<u64> = visible.iter().map(|i| i.id).collect();
    let mut hidden: Vec<u64> = items.iter().map(|i| i.id).filter(|id| !visible_ids.contains(id)).collect();
    hidden.sort_unstable();

    let cards: Vec<CardView> = visible
        .into_iter()
        .map(|item| CardView {
            id: item.id,
            title: item.title.clone(),
            image: item.image.clone(),
            status: item.status,
            score: item.score,
            progress_label: progress_label(item.current, item.total),
            progress_width: progress_width(item.current, item.total),
            can_increment: can_increment(item),
            selected: selected.contains(&item.id),
            busy: pending.contains(&item.id),
        })
        .collect();

    ListView {
        selected_visible: cards.iter().filter(|c| c.selected).count(),
        cards,
        hidden,
        chips: chips(f),
        total: items.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::sort::{Direction, SortKey};
    use crate::list::testing::item;

    #[test]
    fn progress_width_floors() {
        assert_eq!(progress_width(4, Some(12)), Some(33));
        assert_eq!(progress_width(12, Some(12)), Some(100));
        assert_eq!(progress_width(15, Some(12)), Some(100));
        assert_eq!(progress_width(3, Some(0)), None);
        assert_eq!(progress_width(3, None), None);
        assert_eq!(progress_label(3, None), "3 / ?");
    }

    #[test]
    fn one_chip_per_active_value() {
        let mut f = FilterState {
            status: StatusFilter::Only(Status::Completed),
            query: "one".into(),
            year: Some("2019".into()),
            ..Default::default()
        };
        f.tags.insert("Action".into());
        f.tags.insert("Drama".into());
        let c = chips(&f);
        assert_eq!(c.len(), 5);
        assert!(c.contains(&Chip::Value(Category::Tag, "Drama".into())));

        remove_chip(&mut f, &Chip::Value(Category::Tag, "Drama".into()));
        assert_eq!(f.tags.len(), 1);
        remove_chip(&mut f, &Chip::Status(Status::Completed));
        assert_eq!(f.status, StatusFilter::All);
        remove_chip(&mut f, &Chip::Query("one".into()));
        remove_chip(&mut f, &Chip::Year("2019".into()));
        assert_eq!(chips(&f), vec![Chip::Value(Category::Tag, "Action".into())]);
    }

    #[test]
    fn projection_equals_sorted_filtered_items() {
        let mut a = item(1, "Bleach");
        a.score = Some(7);
        let mut b = item(2, "Naruto");
        b.score = Some(9);
        let mut c = item(3, "Nana");
        c.score = Some(8);
        let items = vec![a, b, c];
        let f = FilterState { query: "na".into(), ..Default::default() };
        let spec = SortSpec::new(SortKey::Score, Direction::Desc);

        let view = project(&items, &f, spec, &BTreeSet::from([3]), &BTreeSet::new());
        assert_eq!(view.order(), vec![2, 3]);
        assert_eq!(view.hidden, vec![1]);
        assert_eq!(view.selected_visible, 1);
        assert_eq!(view.total, 3);
        assert!(view.cards[1].selected);
    }

    #[test]
    fn increment_is_refused_at_total() {
        let mut it = item(1, "Done");
        it.current = 12;
        it.total = Some(12);
        assert!(!can_increment(&it));
        it.total = None;
        assert!(can_increment(&it));
    }
}
