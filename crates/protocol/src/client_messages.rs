//! Client-to-server messages.
//!
//! A client reports user interactions and client-side failures back to the
//! agent. Like the server envelope, exactly one field is populated:
//!
//! ```json
//! {"userAction": {
//!   "name": "submit",
//!   "surfaceId": "main",
//!   "sourceComponentId": "submit-button",
//!   "timestamp": "2025-01-01T12:00:00Z",
//!   "context": {"email": "ada@example.com"}
//! }}
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct ClientToServerMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_action: Option<UserAction>,

    /// Opaque client-side error report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "Record<string, unknown> | null")]
    pub error: Option<Map<String, Value>>,
}

impl ClientToServerMessage {
    /// Wrap a user action.
    pub fn user_action(action: UserAction) -> Self {
        Self {
            user_action: Some(action),
            error: None,
        }
    }

    /// Wrap an error report.
    pub fn error(error: Map<String, Value>) -> Self {
        Self {
            user_action: None,
            error: Some(error),
        }
    }
}

/// A user-initiated action raised by a component.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct UserAction {
    /// Action name, taken from the component's `action.name`.
    pub name: String,

    /// Surface the event originated from.
    pub surface_id: String,

    /// Component that triggered the event.
    pub source_component_id: String,

    /// When the event occurred (ISO-8601).
    pub timestamp: DateTime<Utc>,

    /// The component's `action.context` with all bindings resolved.
    #[ts(type = "Record<string, unknown>")]
    pub context: Map<String, Value>,
}

impl UserAction {
    /// Create an action stamped with the current time.
    pub fn new(
        name: impl Into<String>,
        surface_id: impl Into<String>,
        source_component_id: impl Into<String>,
        context: Map<String, Value>,
    ) -> Self {
        Self {
            name: name.into(),
            surface_id: surface_id.into(),
            source_component_id: source_component_id.into(),
            timestamp: Utc::now(),
            context,
        }
    }
}
