#![forbid(unsafe_code)]

//! StyleSheet registry for named styles.
//!
//! Widgets refer to their visual states by class name (for example the
//! action menu panel's `actions-menu__body--show`) and the sheet maps those
//! names to concrete [`Style`]s. Themes override classes without touching
//! widget code.
//!
//! # Example
//! ```
//! use mlui_render::cell::PackedRgba;
//! use mlui_style::{Style, StyleSheet};
//!
//! let sheet = StyleSheet::new();
//! sheet.define("error", Style::new().fg(PackedRgba::rgb(255, 0, 0)).bold());
//! sheet.define("muted", Style::new().dim());
//!
//! assert!(sheet.get("error").is_some());
//! let composed = sheet.compose(&["muted", "error"]);
//! assert!(composed.fg.is_some());
//! ```

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::style::Style;
use crate::{ACTIONS_MENU_BODY, ACTIONS_MENU_BODY_SHOW};
use mlui_render::cell::PackedRgba;

/// Identifier for a named style.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleId(pub String);

impl StyleId {
    /// Create a new StyleId.
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The name as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StyleId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl AsRef<str> for StyleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A registry of named styles.
///
/// Uses an internal `RwLock` so a shared sheet can be read from several
/// places after initialization. A poisoned lock is recovered, since the map
/// is never left half-updated.
#[derive(Debug, Default)]
pub struct StyleSheet {
    styles: RwLock<HashMap<String, Style>>,
}

impl StyleSheet {
    /// Create an empty sheet.
    #[inline]
    pub fn new() -> Self {
        Self {
            styles: RwLock::new(HashMap::new()),
        }
    }

    /// Create a sheet with the console's default classes.
    ///
    /// - `actions-menu__body`: panel base (dark background)
    /// - `actions-menu__body--show`: panel shown
    /// - `actions-menu__item`, `actions-menu__icon`
    /// - `status_<state>`: project and run status colors
    /// - `link`, `error`, `muted`
    #[must_use]
    pub fn with_defaults() -> Self {
        let sheet = Self::new();

        sheet.define(
            ACTIONS_MENU_BODY,
            Style::new()
                .fg(PackedRgba::rgb(220, 220, 230))
                .bg(PackedRgba::rgb(40, 42, 54)),
        );
        sheet.define(
            ACTIONS_MENU_BODY_SHOW,
            Style::new().fg(PackedRgba::rgb(240, 240, 245)),
        );
        sheet.define("actions-menu__item", Style::new());
        sheet.define(
            "actions-menu__icon",
            Style::new().fg(PackedRgba::rgb(139, 233, 253)),
        );

        sheet.define("status_online", Style::new().fg(PackedRgba::rgb(80, 250, 123)));
        sheet.define("status_running", Style::new().fg(PackedRgba::rgb(139, 233, 253)));
        sheet.define("status_completed", Style::new().fg(PackedRgba::rgb(80, 250, 123)));
        sheet.define("status_pending", Style::new().fg(PackedRgba::rgb(241, 250, 140)));
        sheet.define(
            "status_error",
            Style::new().fg(PackedRgba::rgb(255, 85, 85)).bold(),
        );
        sheet.define(
            "status_failed",
            Style::new().fg(PackedRgba::rgb(255, 85, 85)).bold(),
        );
        sheet.define(
            "status_archived",
            Style::new().fg(PackedRgba::rgb(128, 128, 128)).dim(),
        );

        sheet.define("link", Style::new().fg(PackedRgba::rgb(85, 170, 255)).underline());
        sheet.define("error", Style::new().fg(PackedRgba::rgb(255, 85, 85)).bold());
        sheet.define("muted", Style::new().fg(PackedRgba::rgb(128, 128, 128)).dim());

        sheet
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Style>> {
        self.styles.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Style>> {
        self.styles.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Define a named style, replacing any existing one.
    pub fn define(&self, name: impl Into<String>, style: Style) {
        self.write().insert(name.into(), style);
    }

    /// Remove a named style.
    pub fn remove(&self, name: &str) -> Option<Style> {
        self.write().remove(name)
    }

    /// Get a named style.
    pub fn get(&self, name: &str) -> Option<Style> {
        self.read().get(name).copied()
    }

    /// Get a named style, or the default style if not found.
    pub fn get_or_default(&self, name: &str) -> Style {
        self.get(name).unwrap_or_default()
    }

    /// Resolve a class a widget depends on.
    ///
    /// A missing class falls back to the default style and logs a warning,
    /// so a broken theme shows up in the logs instead of as invisible widgets.
    pub fn class(&self, name: &str) -> Style {
        match self.get(name) {
            Some(style) => style,
            None => {
                mlui_core::warn!(class = name, "style class is not defined, using default");
                Style::default()
            }
        }
    }

    /// Whether a style with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    /// Number of defined styles.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether the sheet is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All style names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Compose styles by name, left to right; later names win.
    ///
    /// Missing names are skipped.
    pub fn compose(&self, names: &[&str]) -> Style {
        let styles = self.read();
        names
            .iter()
            .filter_map(|name| styles.get(*name))
            .fold(Style::default(), |acc, style| style.merge(&acc))
    }

    /// Like [`compose`](Self::compose), but `None` if any name is missing.
    pub fn compose_strict(&self, names: &[&str]) -> Option<Style> {
        let styles = self.read();
        let mut result = Style::default();
        for name in names {
            result = styles.get(*name)?.merge(&result);
        }
        Some(result)
    }

    /// Copy every style of `other` into this sheet, overriding same names.
    pub fn extend(&self, other: &StyleSheet) {
        let other_styles = other.read().clone();
        self.write().extend(other_styles);
    }
}

impl Clone for StyleSheet {
    fn clone(&self) -> Self {
        Self {
            styles: RwLock::new(self.read().clone()),
        }
    }
}
