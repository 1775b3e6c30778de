#![forbid(unsafe_code)]

//! Core: geometry, pointer events, dismissal timers, and logging.

pub mod dismiss;
pub mod event;
pub mod geometry;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, error, info, trace, warn};
