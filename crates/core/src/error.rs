//! Error types for message application and stream ingestion.
//!
//! Only malformed input is an error. Lookup misses (unknown surface, missing
//! data path, dangling child id) are reported as `None`, since the protocol
//! allows forward references and partially delivered surfaces.

use thiserror::Error;

/// A malformed unit inside an otherwise applicable message.
///
/// Shape errors reject only the offending component or data entry; the rest
/// of the message is still applied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// The component wrapper object has no type key.
    #[error("component '{component_id}' has no component type")]
    MissingComponentType { component_id: String },

    /// The component wrapper object has more than one type key.
    #[error("component '{component_id}' declares multiple component types: {}", types.join(", "))]
    MultipleComponentTypes {
        component_id: String,
        types: Vec<String>,
    },

    /// The component's properties are not a JSON object.
    #[error("component '{component_id}' of type '{component_type}' has non-object properties")]
    InvalidProperties {
        component_id: String,
        component_type: String,
    },

    /// A data entry carries none of the typed value fields.
    #[error("data entry '{key}' has no value")]
    EmptyDataEntry { key: String },
}

/// Raised by `apply_message` after every well-formed part has been applied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} malformed unit(s) in message for surface '{surface_id}': {}", errors.len(), summarize(errors))]
pub struct ApplyError {
    pub surface_id: String,
    pub errors: Vec<ShapeError>,
}

fn summarize(errors: &[ShapeError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors raised while consuming a JSON Lines feed.
#[derive(Error, Debug)]
pub enum StreamError {
    /// Reading from the underlying source failed. Ends the stream.
    #[error("failed to read message stream: {0}")]
    Io(#[from] std::io::Error),

    /// A line is not a valid server-to-client message. Only that line is
    /// skipped.
    #[error("failed to parse message on line {line_number}: {source}")]
    Parse {
        line_number: usize,
        source: serde_json::Error,
    },

    /// A line parsed but part of its message was malformed.
    #[error(transparent)]
    Apply(#[from] ApplyError),
}

/// Type alias for Result with ApplyError.
pub type ApplyResult<T> = Result<T, ApplyError>;
