//! REST client for the backend. Every response is parsed into the typed
//! structs of `types` before anything else sees it.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::ApiError;
use crate::types::{ListUpdate, QuickSearchHit};

/// Everything except the RFC 3986 unreserved characters.
const QUERY: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

pub fn encode(value: &str) -> String {
    utf8_percent_encode(value, QUERY).to_string()
}

/// `k=v&k=v`, usable both as a query string and as an urlencoded body.
pub fn encode_pairs<I, K, V>(pairs: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    pairs
        .into_iter()
        .map(|(k, v)| format!("{}={}", encode(k.as_ref()), encode(v.as_ref())))
        .collect::<Vec<_>>()
        .join("&")
}

/// Parameters of `GET /api/advanced-search`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchQuery {
    pub q: String,
    pub studio: String,
    pub year: String,
    /// Comma-joined, as typed.
    pub tags: String,
    pub themes: String,
    pub demographics: String,
    pub sort_by: String,
    pub page: u32,
}

pub mod routes {
    use super::{encode, encode_pairs, SearchQuery};

    pub const ADMIN_RECORD_ADD: &str = "/admin/api/record/add";
    pub const ADMIN_BULK_IMPORT: &str = "/admin/api/bulk-import";
    pub const IMPORT_MAL: &str = "/import/mal";

    pub fn admin_records(q: &str) -> String {
        format!("/admin/api/records?q={}", encode(q))
    }
    pub fn admin_record(id: u64) -> String {
        format!("/admin/api/record/{id}")
    }
    pub fn admin_record_update(id: u64) -> String {
        format!("/admin/api/record/update/{id}")
    }
    pub fn admin_record_delete(id: u64) -> String {
        format!("/admin/api/record/delete/{id}")
    }
    pub fn quick_search(q: &str) -> String {
        format!("/api/search?q={}", encode(q))
    }
    pub fn advanced_search(query: &SearchQuery) -> String {
        let page = query.page.max(1).to_string();
        let sort_by = if query.sort_by.is_empty() { "popularity" } else { query.sort_by.as_str() };
        let qs = encode_pairs([
            ("q", query.q.as_str()),
            ("studio", query.studio.as_str()),
            ("year", query.year.as_str()),
            ("tags", query.tags.as_str()),
            ("themes", query.themes.as_str()),
            ("demographics", query.demographics.as_str()),
            ("sort_by", sort_by),
            ("page", page.as_str()),
        ]);
        format!("/api/advanced-search?{qs}")
    }
    pub fn list_add(record_id: u64) -> String {
        format!("/list/add/{record_id}")
    }
    pub fn list_update(id: u64) -> String {
        format!("/list/update/{id}")
    }
    pub fn list_delete(id: u64) -> String {
        format!("/list/delete/{id}")
    }
}

/// Personal-list operations; the seam batch deletes and tests go through.
#[allow(async_fn_in_trait)]
pub trait ListApi {
    async fn add_to_list(&self, record_id: u64) -> Result<(), ApiError>;
    async fn update_entry(&self, id: u64, update: &ListUpdate) -> Result<(), ApiError>;
    async fn delete_entry(&self, id: u64) -> Result<(), ApiError>;
    async fn quick_search(&self, q: &str) -> Result<Vec<QuickSearchHit>, ApiError>;
}

#[cfg(target_arch = "wasm32")]
pub use http::Client;

#[cfg(target_arch = "wasm32")]
mod http {
    use serde::de::DeserializeOwned;
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{File, FormData, Request, RequestInit, Response};

    use super::{encode_pairs, routes, ListApi, SearchQuery};
    use crate::error::ApiError;
    use crate::types::{
        ApiMessage, ImportOptions, ImportResponse, ListUpdate, QuickSearchHit, RecordDetail,
        RecordForm, RecordSummary, SearchPage,
    };

    fn js_err(e: JsValue) -> ApiError {
        ApiError::Network(e.as_string().unwrap_or_else(|| format!("{e:?}")))
    }

    enum Body {
        Empty,
        Json(String),
        Urlencoded(String),
        Multipart(FormData),
    }

    /// `fetch`-backed client for same-origin endpoints.
    #[derive(Clone, Default, PartialEq)]
    pub struct Client;

    impl Client {
        async fn send(&self, method: &str, path: &str, body: Body) -> Result<Response, ApiError> {
            let opts = RequestInit::new();
            opts.set_method(method);
            let content_type = match &body {
                Body::Empty => None,
                Body::Json(s) => {
                    opts.set_body(&JsValue::from_str(s));
                    Some("application/json")
                }
                Body::Urlencoded(s) => {
                    opts.set_body(&JsValue::from_str(s));
                    Some("application/x-www-form-urlencoded")
                }
                // The browser sets the multipart boundary itself.
                Body::Multipart(form) => {
                    opts.set_body(form);
                    None
                }
            };
            let request = Request::new_with_str_and_init(path, &opts).map_err(js_err)?;
            if let Some(ct) = content_type {
                request.headers().set("Content-Type", ct).map_err(js_err)?;
            }
            let window = web_sys::window().ok_or_else(|| ApiError::Network("no window".into()))?;
            let value = JsFuture::from(window.fetch_with_request(&request)).await.map_err(js_err)?;
            let response: Response = value.dyn_into().map_err(js_err)?;
            crate::log::debug(
                "http",
                serde_json::json!({ "method": method, "path": path, "status": response.status() }),
            );
            Ok(response)
        }

        async fn text(response: &Response) -> Result<String, ApiError> {
            let promise = response.text().map_err(js_err)?;
            let value = JsFuture::from(promise).await.map_err(js_err)?;
            Ok(value.as_string().unwrap_or_default())
        }

        async fn decode<T: DeserializeOwned>(response: &Response) -> Result<T, ApiError> {
            let body = Self::text(response).await?;
            serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
        }

        /// Non-OK responses become `ApiError`, reading `{message}` when there is one.
        async fn checked(response: Response) -> Result<Response, ApiError> {
            if response.ok() {
                return Ok(response);
            }
            let message = Self::decode::<ApiMessage>(&response).await.ok().map(|m| m.message);
            Err(ApiError::rejected(response.status(), message))
        }

        async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
            let response = Self::checked(self.send("GET", path, Body::Empty).await?).await?;
            Self::decode(&response).await
        }

        async fn post(&self, path: &str, body: Body) -> Result<Response, ApiError> {
            Self::checked(self.send("POST", path, body).await?).await
        }

        pub async fn records(&self, q: &str) -> Result<Vec<RecordSummary>, ApiError> {
            self.get_json(&routes::admin_records(q)).await
        }

        pub async fn record(&self, id: u64) -> Result<RecordDetail, ApiError> {
            self.get_json(&routes::admin_record(id)).await
        }

        /// Create when `id` is `None`, otherwise update.
        pub async fn save_record(&self, id: Option<u64>, form: &RecordForm) -> Result<(), ApiError> {
            let path = match id {
                Some(id) => routes::admin_record_update(id),
                None => routes::ADMIN_RECORD_ADD.to_string(),
            };
            let body = encode_pairs(form.fields());
            self.post(&path, Body::Urlencoded(body)).await.map(|_| ())
        }

        pub async fn delete_record(&self, id: u64) -> Result<(), ApiError> {
            self.post(&routes::admin_record_delete(id), Body::Empty).await.map(|_| ())
        }

        /// The server answers `{message}` both on success and failure.
        pub async fn bulk_import(&self, file: &File) -> Result<String, ApiError> {
            let form = FormData::new().map_err(js_err)?;
            form.append_with_blob_and_filename("file", file, &file.name()).map_err(js_err)?;
            let response = self.post(routes::ADMIN_BULK_IMPORT, Body::Multipart(form)).await?;
            Ok(Self::decode::<ApiMessage>(&response).await?.message)
        }

        pub async fn advanced_search(&self, query: &SearchQuery) -> Result<SearchPage, ApiError> {
            self.get_json(&routes::advanced_search(query)).await
        }

        pub async fn import_mal(&self, file: &File, options: ImportOptions) -> Result<ImportResponse, ApiError> {
            let form = FormData::new().map_err(js_err)?;
            form.append_with_blob_and_filename("file", file, &file.name()).map_err(js_err)?;
            let flag = |b: bool| if b { "true" } else { "false" };
            form.append_with_str("import_scores", flag(options.import_scores)).map_err(js_err)?;
            form.append_with_str("import_notes", flag(options.import_notes)).map_err(js_err)?;
            form.append_with_str("import_dates", flag(options.import_dates)).map_err(js_err)?;
            let response = self.post(routes::IMPORT_MAL, Body::Multipart(form)).await?;
            Self::decode(&response).await
        }
    }

    impl ListApi for Client {
        async fn add_to_list(&self, record_id: u64) -> Result<(), ApiError> {
            self.post(&routes::list_add(record_id), Body::Empty).await.map(|_| ())
        }

        async fn update_entry(&self, id: u64, update: &ListUpdate) -> Result<(), ApiError> {
            let body = serde_json::to_string(update).map_err(|e| ApiError::Decode(e.to_string()))?;
            self.post(&routes::list_update(id), Body::Json(body)).await.map(|_| ())
        }

        async fn delete_entry(&self, id: u64) -> Result<(), ApiError> {
            self.post(&routes::list_delete(id), Body::Empty).await.map(|_| ())
        }

        async fn quick_search(&self, q: &str) -> Result<Vec<QuickSearchHit>, ApiError> {
            self.get_json(&routes::quick_search(q)).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecordForm;

    #[test]
    fn query_values_are_percent_encoded() {
        assert_eq!(routes::quick_search("one piece&co"), "/api/search?q=one%20piece%26co");
        assert_eq!(routes::admin_records("Çağ"), "/admin/api/records?q=%C3%87a%C4%9F");
    }

    #[test]
    fn advanced_search_carries_every_parameter() {
        let q = SearchQuery {
            q: "solo".into(),
            tags: "Action,Fantasy".into(),
            year: "2018".into(),
            page: 3,
            ..Default::default()
        };
        assert_eq!(
            routes::advanced_search(&q),
            "/api/advanced-search?q=solo&studio=&year=2018&tags=Action%2CFantasy&themes=&demographics=&sort_by=popularity&page=3"
        );
    }

    #[test]
    fn page_zero_is_sent_as_first_page() {
        let q = SearchQuery { sort_by: "score".into(), ..Default::default() };
        assert!(routes::advanced_search(&q).ends_with("sort_by=score&page=1"));
    }

    #[test]
    fn record_form_is_urlencoded_in_field_order() {
        let form = RecordForm {
            original_title: "Ore dake Level Up na Ken".into(),
            record_type: "Manhwa".into(),
            ..Default::default()
        };
        let body = encode_pairs(form.fields());
        assert!(body.starts_with("original_title=Ore%20dake%20Level%20Up%20na%20Ken&english_title=&record_type=Manhwa"));
        assert!(body.ends_with("&demographics="));
    }

    #[test]
    fn list_routes() {
        assert_eq!(routes::list_add(5), "/list/add/5");
        assert_eq!(routes::list_update(6), "/list/update/6");
        assert_eq!(routes::list_delete(7), "/list/delete/7");
        assert_eq!(routes::admin_record_delete(8), "/admin/api/record/delete/8");
    }
}
