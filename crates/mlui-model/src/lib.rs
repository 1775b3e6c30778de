#![forbid(unsafe_code)]

//! View models for the console: function records and label chips.

pub mod error;
pub mod function;
pub mod labels;

pub use error::ModelError;
pub use function::{Function, FunctionRecord, FunctionState, FunctionUi, parse_function};
pub use labels::{LabelMap, labels_to_chips, parse_labels};
