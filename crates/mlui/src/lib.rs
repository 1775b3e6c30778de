#![forbid(unsafe_code)]

//! Public facade for the console widgets.
//!
//! Re-exports the types a host needs to place action menus and project
//! tables in a cell-based UI, plus a prelude for day-to-day usage.
//!
//! # Example
//! ```
//! use mlui::prelude::*;
//!
//! let (mut host, overlay) = OverlayHost::with_default_layer(Size::new(80, 24));
//! let styles = StyleSheet::with_defaults();
//! let menu = vec![MenuItem::new("Delete", |_: &DataItem| {})];
//! let mut state = ActionsMenuState::new(ActionsMenuConfig::new(menu, overlay));
//!
//! let mut frame = Frame::with_hit_grid(80, 24);
//! ActionsMenu::new(&styles).render(Rect::new(3, 1, 1, 1), &mut frame, &mut state);
//! ActionsMenu::new(&styles).render_overlay(&mut host, &mut state)?;
//! host.compose(&mut frame);
//! # Ok::<(), mlui::Error>(())
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use mlui_core::dismiss::DismissTimer;
pub use mlui_core::event::{Event, Modifiers, MouseButton, MouseEvent, MouseEventKind};
pub use mlui_core::geometry::{BoundingBox, Rect, Size};

// --- Render re-exports -----------------------------------------------------

pub use mlui_render::buffer::Buffer;
pub use mlui_render::cell::{Cell, PackedRgba, StyleFlags};
pub use mlui_render::frame::{Frame, HitId, HitRegion};
pub use mlui_render::overlay::{DEFAULT_OVERLAY_ID, OverlayError, OverlayHandle, OverlayHost};

// --- Style re-exports ------------------------------------------------------

pub use mlui_style::{Style, StyleId, StyleSheet};

// --- Model re-exports ------------------------------------------------------

pub use mlui_model::{Function, FunctionRecord, FunctionState, ModelError, parse_function};

// --- Widget re-exports -----------------------------------------------------

pub use mlui_widgets::{
    ActionsMenu, ActionsMenuConfig, ActionsMenuError, ActionsMenuEvent, ActionsMenuItem,
    ActionsMenuState, DataItem, MenuItem, MenuSource, PositionStyle, ProjectTable,
    ProjectTableData, StatefulWidget, Widget,
};

#[cfg(feature = "tracing-json")]
pub use mlui_core::logging::init_json;

// --- Errors ---------------------------------------------------------------

/// Top-level error type for console hosts.
#[derive(Debug)]
pub enum Error {
    /// A widget could not render.
    Render(ActionsMenuError),
    /// A backend record could not be loaded.
    Model(ModelError),
    /// A data item could not be built from a record.
    DataItem(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Render(err) => write!(f, "{err}"),
            Self::Model(err) => write!(f, "{err}"),
            Self::DataItem(err) => write!(f, "invalid data item: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(err) => Some(err),
            Self::Model(err) => Some(err),
            Self::DataItem(err) => Some(err),
        }
    }
}

impl From<ActionsMenuError> for Error {
    fn from(err: ActionsMenuError) -> Self {
        Self::Render(err)
    }
}

impl From<OverlayError> for Error {
    fn from(err: OverlayError) -> Self {
        Self::Render(err.into())
    }
}

impl From<ModelError> for Error {
    fn from(err: ModelError) -> Self {
        Self::Model(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::DataItem(err)
    }
}

/// Standard result type for console APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Data item for a backend function record.
///
/// Parses the record, flattens it with [`parse_function`], and wraps the
/// result so menu actions receive the normalized function.
pub fn function_data_item(json: &str, project_name: &str) -> Result<DataItem> {
    let record = FunctionRecord::from_json(json)?;
    let function = parse_function(&record, project_name, None);
    Ok(DataItem::from_serialize(&function)?)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ActionsMenu, ActionsMenuConfig, ActionsMenuEvent, ActionsMenuState, DataItem, Error,
        Event, Frame, MenuItem, MenuSource, OverlayHost, Rect, Result, Size, StatefulWidget,
        StyleSheet, Widget,
    };

    pub use crate::{core, model, render, style, widgets};
}

pub use mlui_core as core;
pub use mlui_model as model;
pub use mlui_render as render;
pub use mlui_style as style;
pub use mlui_widgets as widgets;
