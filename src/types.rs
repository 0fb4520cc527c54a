use serde::{Deserialize, Serialize};

/// Tracking status of a list entry. The wire values are the backend's
/// locale strings, so they are kept verbatim.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Status {
    #[serde(rename = "Planlandı")]
    Planned,
    #[serde(rename = "İzleniyor")]
    Watching,
    #[serde(rename = "Okunuyor")]
    Reading,
    #[serde(rename = "Tamamlandı")]
    Completed,
    #[serde(rename = "Bırakıldı")]
    Dropped,
}

pub const ALL_STATUSES: [Status; 5] = [
    Status::Planned,
    Status::Watching,
    Status::Reading,
    Status::Completed,
    Status::Dropped,
];

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Planned => "Planlandı",
            Status::Watching => "İzleniyor",
            Status::Reading => "Okunuyor",
            Status::Completed => "Tamamlandı",
            Status::Dropped => "Bırakıldı",
        }
    }

    pub fn from_label(s: &str) -> Option<Status> {
        ALL_STATUSES.iter().copied().find(|st| st.label() == s)
    }

    /// Swap the in-progress status into the vocabulary of `kind`
    /// (anime is watched, everything else is read).
    pub fn for_kind(self, kind: MediaKind) -> Status {
        match (self, kind) {
            (Status::Reading, MediaKind::Anime) => Status::Watching,
            (Status::Watching, MediaKind::Print) => Status::Reading,
            (s, _) => s,
        }
    }

    /// Statuses offered in the edit modal for `kind`.
    pub fn choices(kind: MediaKind) -> [Status; 4] {
        let active = match kind {
            MediaKind::Anime => Status::Watching,
            MediaKind::Print => Status::Reading,
        };
        [Status::Planned, active, Status::Completed, Status::Dropped]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Anime,
    Print,
}

impl MediaKind {
    pub fn from_record_type(record_type: &str) -> MediaKind {
        if record_type.trim().eq_ignore_ascii_case("anime") {
            MediaKind::Anime
        } else {
            MediaKind::Print
        }
    }
}

/// One entry of the user's personal list, as rendered into the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    /// User-list id; also the insertion order.
    pub id: u64,
    pub record_id: u64,
    pub title: String,
    #[serde(default)]
    pub alt_title: String,
    pub status: Status,
    #[serde(default)]
    pub current: u32,
    #[serde(default)]
    pub total: Option<u32>,
    #[serde(default)]
    pub score: Option<u8>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub studio: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub themes: String,
    #[serde(default)]
    pub demographics: String,
    #[serde(default)]
    pub record_type: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl ListItem {
    pub fn kind(&self) -> MediaKind {
        MediaKind::from_record_type(&self.record_type)
    }
}

/// `GET /admin/api/records`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// `GET /admin/api/record/<id>`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecordDetail {
    pub id: u64,
    pub original_title: String,
    #[serde(default)]
    pub english_title: Option<String>,
    #[serde(default)]
    pub record_type: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub studios: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub themes: Option<String>,
    #[serde(default)]
    pub demographics: Option<String>,
}

impl RecordDetail {
    pub fn tag_list(&self) -> Vec<String> {
        split_joined(self.tags.as_deref().unwrap_or_default())
    }
}

/// Admin create/update form, posted urlencoded.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordForm {
    pub original_title: String,
    pub english_title: String,
    pub record_type: String,
    pub image_url: String,
    pub synopsis: String,
    pub release_year: String,
    pub source: String,
    pub studios: String,
    pub tags: String,
    pub themes: String,
    pub demographics: String,
}

impl RecordForm {
    pub fn from_detail(d: &RecordDetail) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            original_title: d.original_title.clone(),
            english_title: text(&d.english_title),
            record_type: d.record_type.clone().unwrap_or_else(|| "Manhwa".into()),
            image_url: text(&d.image_url),
            synopsis: text(&d.synopsis),
            release_year: d.release_year.map(|y| y.to_string()).unwrap_or_default(),
            source: text(&d.source),
            studios: text(&d.studios),
            tags: text(&d.tags),
            themes: text(&d.themes),
            demographics: text(&d.demographics),
        }
    }

    pub fn fields(&self) -> [(&'static str, &str); 11] {
        [
            ("original_title", &self.original_title),
            ("english_title", &self.english_title),
            ("record_type", &self.record_type),
            ("image_url", &self.image_url),
            ("synopsis", &self.synopsis),
            ("release_year", &self.release_year),
            ("source", &self.source),
            ("studios", &self.studios),
            ("tags", &self.tags),
            ("themes", &self.themes),
            ("demographics", &self.demographics),
        ]
    }
}

/// `GET /api/search`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickSearchHit {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// One card of `GET /api/advanced-search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub in_list: bool,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub total_episodes: Option<u32>,
    #[serde(default)]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    pub results: Vec<SearchResult>,
    #[serde(default)]
    pub has_next: bool,
}

/// Body of `POST /list/update/<id>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListUpdate {
    pub status: Status,
    pub current_chapter: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_score: Option<u8>,
    pub notes: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub silent: bool,
}

impl ListUpdate {
    pub fn from_item(item: &ListItem) -> Self {
        Self {
            status: item.status,
            current_chapter: item.current,
            user_score: item.score,
            notes: item.notes.clone(),
            silent: false,
        }
    }
}

/// `{message}` bodies (errors, bulk import result).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: String,
}

/// `POST /import/mal`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportOptions {
    pub import_scores: bool,
    pub import_notes: bool,
    pub import_dates: bool,
}

/// Split a comma-joined field, dropping blanks.
pub fn split_joined(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_backend_strings_on_the_wire() {
        let json = serde_json::to_string(&Status::Watching).unwrap();
        assert_eq!(json, "\"İzleniyor\"");
        let back: Status = serde_json::from_str("\"Bırakıldı\"").unwrap();
        assert_eq!(back, Status::Dropped);
        assert_eq!(Status::from_label("Okunuyor"), Some(Status::Reading));
        assert_eq!(Status::from_label("reading"), None);
    }

    #[test]
    fn status_vocabulary_follows_media_kind() {
        assert_eq!(Status::Reading.for_kind(MediaKind::Anime), Status::Watching);
        assert_eq!(Status::Watching.for_kind(MediaKind::Print), Status::Reading);
        assert_eq!(Status::Completed.for_kind(MediaKind::Anime), Status::Completed);
        assert!(!Status::choices(MediaKind::Anime).contains(&Status::Reading));
        assert!(!Status::choices(MediaKind::Print).contains(&Status::Watching));
        assert_eq!(MediaKind::from_record_type("Anime"), MediaKind::Anime);
        assert_eq!(MediaKind::from_record_type("Manhwa"), MediaKind::Print);
    }

    #[test]
    fn list_item_tolerates_missing_optional_fields() {
        let item: ListItem = serde_json::from_str(
            r#"{"id": 7, "record_id": 3, "title": "Naruto", "status": "İzleniyor", "year": 2002}"#,
        )
        .unwrap();
        assert_eq!(item.alt_title, "");
        assert_eq!(item.total, None);
        assert_eq!(item.year, Some(2002));
    }

    #[test]
    fn quick_increment_payload_carries_silent_flag_only_when_set() {
        let mut update = ListUpdate {
            status: Status::Reading,
            current_chapter: 4,
            user_score: None,
            notes: String::new(),
            silent: false,
        };
        let plain = serde_json::to_value(&update).unwrap();
        assert!(plain.get("silent").is_none());
        assert!(plain.get("user_score").is_none());

        update.silent = true;
        let silent = serde_json::to_value(&update).unwrap();
        assert_eq!(silent["silent"], true);
        assert_eq!(silent["current_chapter"], 4);
    }

    #[test]
    fn search_page_parses_result_cards() {
        let page: SearchPage = serde_json::from_str(
            r#"{"results": [{"id": 1, "title": "Solo Leveling", "type": "Manhwa",
                 "in_list": true, "status": "Finished", "total_episodes": null, "score": 8.7}],
                "has_next": false}"#,
        )
        .unwrap();
        assert_eq!(page.results[0].kind.as_deref(), Some("Manhwa"));
        assert!(page.results[0].in_list);
        assert!(!page.has_next);
    }

    #[test]
    fn detail_tags_split_on_commas() {
        let d = RecordDetail {
            tags: Some("Action, Fantasy ,,Drama".into()),
            ..Default::default()
        };
        assert_eq!(d.tag_list(), vec!["Action", "Fantasy", "Drama"]);
    }
}
