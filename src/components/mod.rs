pub mod chips;
pub mod confirm_modal;
pub mod list_card;
pub mod mal_import;
pub mod quick_search;
pub mod theme_toggle;
pub mod topbar;
