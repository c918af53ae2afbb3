//! User interface
//!
//! A single page: search header, card dashboard, bottom nav, and the voice
//! modal, all over a decorative space backdrop.

pub mod app;
pub mod components;
pub mod state;
pub mod theme;

pub use app::EtLightApp;
pub use state::{greeting_line, NavTab, PageState};
pub use theme::Theme;
