#![forbid(unsafe_code)]

//! Style types and the named-class style sheet.

pub mod style;
pub mod stylesheet;

pub use style::Style;
pub use stylesheet::{StyleId, StyleSheet};

/// Class of the action menu panel; always applied.
pub const ACTIONS_MENU_BODY: &str = "actions-menu__body";
/// Class added to the action menu panel while it is open.
pub const ACTIONS_MENU_BODY_SHOW: &str = "actions-menu__body--show";
