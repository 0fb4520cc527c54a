/// Which server page this bundle is mounted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Search,
    Admin,
    /// Profile, auth and other server pages: only the shared chrome.
    Other,
}

impl Page {
    pub fn from_path(path: &str) -> Page {
        let first = path.trim_start_matches('/').split('/').next().unwrap_or_default();
        match first {
            "" => Page::Dashboard,
            "admin" => Page::Admin,
            "search" => Page::Search,
            _ => Page::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Page::Dashboard => "My List",
            Page::Search => "Browse",
            Page::Admin => "Admin",
            Page::Other => "",
        }
    }

    pub fn href(&self) -> &'static str {
        match self {
            Page::Dashboard => "/",
            Page::Search => "/search",
            Page::Admin => "/admin",
            Page::Other => "",
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use component::App;

#[cfg(target_arch = "wasm32")]
mod component {
    use std::rc::Rc;

    use serde_json::json;
    use yew::prelude::*;

    use super::Page;
    use crate::components::topbar::Topbar;
    use crate::config::{self, AppConfig};
    use crate::{dom, log, pages};

    #[function_component(App)]
    pub fn app() -> Html {
        let cfg = use_memo((), |_| {
            let cfg = config::load();
            log::set_debug(cfg.debug_logs);
            cfg
        });
        let page = use_memo((), |_| Page::from_path(&dom::pathname()));

        {
            let page = *page;
            use_effect_with((), move |_| {
                log::info(
                    "boot",
                    json!({
                        "page": page.label(),
                        "version": env!("CARGO_PKG_VERSION"),
                        "built": option_env!("VERGEN_BUILD_TIMESTAMP"),
                        "target": option_env!("VERGEN_CARGO_TARGET_TRIPLE"),
                        "rustc": option_env!("VERGEN_RUSTC_SEMVER"),
                    }),
                );
                || ()
            });
        }

        let body = match *page {
            Page::Dashboard => html! { <pages::dashboard::DashboardPage /> },
            Page::Search => html! { <pages::search::SearchPage /> },
            Page::Admin => html! { <pages::admin::AdminPage /> },
            Page::Other => html! {},
        };

        html! {
            <ContextProvider<Rc<AppConfig>> context={cfg}>
                <Topbar current={*page} />
                { body }
            </ContextProvider<Rc<AppConfig>>>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_follow_the_first_path_segment() {
        assert_eq!(Page::from_path("/"), Page::Dashboard);
        assert_eq!(Page::from_path(""), Page::Dashboard);
        assert_eq!(Page::from_path("/search"), Page::Search);
        assert_eq!(Page::from_path("/search/"), Page::Search);
        assert_eq!(Page::from_path("/admin/records"), Page::Admin);
        assert_eq!(Page::from_path("/administrator"), Page::Other);
        assert_eq!(Page::from_path("/profile"), Page::Other);
    }
}
