#![forbid(unsafe_code)]

//! Function records.
//!
//! The backend returns functions as loosely shaped JSON: any section may be
//! absent and most fields are optional. [`parse_function`] flattens a
//! [`FunctionRecord`] into the [`Function`] view model with every field
//! defaulted, so widgets never have to deal with missing data.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ModelError;
use crate::labels::LabelMap;

type Object = Map<String, Value>;

/// Raw function record as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FunctionRecord {
    pub kind: Option<String>,
    pub metadata: FunctionMetadata,
    pub spec: Option<FunctionSpec>,
    pub status: Option<FunctionStatus>,
    #[serde(skip)]
    raw: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FunctionMetadata {
    pub credentials: Option<Credentials>,
    pub hash: Option<String>,
    pub labels: Option<LabelMap>,
    pub name: Option<String>,
    pub project: Option<String>,
    pub tag: Option<String>,
    pub updated: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub access_key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FunctionSpec {
    pub args: Option<Vec<Value>>,
    pub base_spec: Option<Object>,
    pub build: Option<Object>,
    pub command: Option<String>,
    pub default_class: Option<String>,
    pub default_handler: Option<String>,
    pub description: Option<String>,
    pub env: Option<Vec<Value>>,
    pub error_stream: Option<String>,
    pub graph: Option<Object>,
    pub image: Option<String>,
    pub parameters: Option<Object>,
    pub preemption_mode: Option<String>,
    pub priority_class_name: Option<String>,
    pub resources: Option<Object>,
    pub secret_sources: Option<Vec<Value>>,
    pub track_models: Option<bool>,
    pub volume_mounts: Option<Vec<Value>>,
    pub volumes: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FunctionStatus {
    pub nuclio_name: Option<String>,
    pub state: Option<String>,
}

impl FunctionRecord {
    /// Parse a record from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        Self::from_value(serde_json::from_str(text)?)
    }

    /// Build a record from an already parsed JSON value.
    ///
    /// The value is kept as the record's original content.
    pub fn from_value(value: Value) -> Result<Self, ModelError> {
        let mut record: Self = serde_json::from_value(value.clone())?;
        record.raw = value;
        Ok(record)
    }

    /// The JSON this record was built from (`Null` for records built in code).
    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

/// Display state of a function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionState {
    pub value: String,
    pub label: String,
    pub class_name: String,
}

impl FunctionState {
    /// State for a function-page entry.
    ///
    /// Known states get their display label; unknown ones are capitalized.
    /// The class is always `state-<value>-function`.
    pub fn for_function(value: &str) -> Self {
        let label = match value {
            "ready" => "Ready".to_owned(),
            "error" => "Error".to_owned(),
            "failed" => "Failed".to_owned(),
            "running" => "Running".to_owned(),
            "pending" => "Pending".to_owned(),
            "deploying" => "Deploying".to_owned(),
            "unhealthy" => "Unhealthy".to_owned(),
            "imageNotFound" => "Image not found".to_owned(),
            "completed" => "Completed".to_owned(),
            "aborted" => "Aborted".to_owned(),
            "created" => "Created".to_owned(),
            other => capitalize(other),
        };
        Self {
            value: value.to_owned(),
            label,
            class_name: format!("state-{value}-function"),
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// UI bookkeeping attached to a parsed function.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionUi {
    pub original_content: Value,
}

/// Function view model with every field defaulted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Function {
    pub access_key: String,
    pub args: Vec<Value>,
    pub base_spec: Object,
    pub build: Object,
    pub command: Option<String>,
    pub default_class: String,
    pub default_handler: String,
    pub description: String,
    pub env: Vec<Value>,
    pub error_stream: String,
    pub graph: Object,
    pub hash: String,
    pub image: String,
    pub labels: LabelMap,
    pub name: String,
    pub nuclio_name: String,
    pub parameters: Object,
    pub preemption_mode: String,
    pub priority_class_name: String,
    pub project: String,
    pub resources: Object,
    pub secret_sources: Vec<Value>,
    pub state: FunctionState,
    pub tag: String,
    pub track_models: bool,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub volume_mounts: Vec<Value>,
    pub volumes: Vec<Value>,
    pub updated: Option<DateTime<Utc>>,
    pub ui: FunctionUi,
}

/// Flatten a backend record into the function view model.
///
/// `project` falls back to `project_name` when the record has none (or an
/// empty one). A non-empty `custom_state` overrides `status.state`.
pub fn parse_function(
    record: &FunctionRecord,
    project_name: &str,
    custom_state: Option<&str>,
) -> Function {
    let meta = &record.metadata;
    let spec = record.spec.clone().unwrap_or_default();
    let status = record.status.clone().unwrap_or_default();

    let state_value = custom_state
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .or(status.state)
        .unwrap_or_default();

    let project = meta
        .project
        .clone()
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| project_name.to_owned());

    Function {
        access_key: meta
            .credentials
            .as_ref()
            .and_then(|c| c.access_key.clone())
            .unwrap_or_default(),
        args: spec.args.unwrap_or_default(),
        base_spec: spec.base_spec.unwrap_or_default(),
        build: spec.build.unwrap_or_default(),
        command: spec.command,
        default_class: spec.default_class.unwrap_or_default(),
        default_handler: spec.default_handler.unwrap_or_default(),
        description: spec.description.unwrap_or_default(),
        env: spec.env.unwrap_or_default(),
        error_stream: spec.error_stream.unwrap_or_default(),
        graph: spec.graph.unwrap_or_default(),
        hash: meta.hash.clone().unwrap_or_default(),
        image: spec.image.unwrap_or_default(),
        labels: meta.labels.clone().unwrap_or_else(BTreeMap::new),
        name: meta.name.clone().unwrap_or_default(),
        nuclio_name: status.nuclio_name.unwrap_or_default(),
        parameters: spec.parameters.unwrap_or_default(),
        preemption_mode: spec.preemption_mode.unwrap_or_default(),
        priority_class_name: spec.priority_class_name.unwrap_or_default(),
        project,
        resources: spec.resources.unwrap_or_default(),
        secret_sources: spec.secret_sources.unwrap_or_default(),
        state: FunctionState::for_function(&state_value),
        tag: meta.tag.clone().unwrap_or_default(),
        track_models: spec.track_models.unwrap_or(false),
        kind: record.kind.clone(),
        volume_mounts: spec.volume_mounts.unwrap_or_default(),
        volumes: spec.volumes.unwrap_or_default(),
        updated: meta.updated.as_deref().and_then(parse_timestamp),
        ui: FunctionUi {
            original_content: record.raw.clone(),
        },
    }
}

/// Parse a backend timestamp. Offsetless timestamps are taken as UTC.
fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    match NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(naive) => Some(naive.and_utc()),
        Err(_) => {
            mlui_core::debug!(updated = text, "unparsable function timestamp");
            None
        }
    }
}
