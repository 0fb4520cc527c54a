//! Browser client of the Lyst anime/manhwa tracker: personal list dashboard,
//! catalogue search and the admin catalogue screens.

pub mod api;
pub mod app;
pub mod batch;
pub mod config;
pub mod debounce;
pub mod error;
pub mod list;
pub mod log;
pub mod modal;
pub mod pager;
pub mod theme;
pub mod types;

#[cfg(target_arch = "wasm32")]
pub mod components;
#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod pages;
