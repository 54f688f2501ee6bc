//! Server-to-client messages.
//!
//! Each line of an A2UI feed is one [`ServerToClientMessage`]. A well-formed
//! message populates exactly one of its four fields:
//!
//! ```json
//! {"beginRendering": {"surfaceId": "main", "root": "card"}}
//! {"surfaceUpdate": {"surfaceId": "main", "components": [
//!     {"id": "card", "component": {"Card": {"child": "title"}}}
//! ]}}
//! {"dataModelUpdate": {"surfaceId": "main", "contents": [
//!     {"key": "name", "valueString": "Ada"}
//! ]}}
//! {"deleteSurface": {"surfaceId": "main"}}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use ts_rs::TS;

/// Envelope for everything an agent sends to the client.
///
/// The protocol requires exactly one populated field. Consumers that receive
/// more than one should use [`ServerToClientMessage::into_action`], which
/// applies a fixed precedence (`beginRendering`, `surfaceUpdate`,
/// `dataModelUpdate`, `deleteSurface`).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct ServerToClientMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin_rendering: Option<BeginRendering>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface_update: Option<SurfaceUpdate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_model_update: Option<DataModelUpdate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_surface: Option<DeleteSurface>,
}

/// Discriminant of a server-to-client message, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    BeginRendering,
    SurfaceUpdate,
    DataModelUpdate,
    DeleteSurface,
}

impl MessageKind {
    /// The JSON field name carrying this kind of message.
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::BeginRendering => "beginRendering",
            MessageKind::SurfaceUpdate => "surfaceUpdate",
            MessageKind::DataModelUpdate => "dataModelUpdate",
            MessageKind::DeleteSurface => "deleteSurface",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single action selected from a [`ServerToClientMessage`].
#[derive(Debug, Clone, PartialEq)]
pub enum ServerAction {
    BeginRendering(BeginRendering),
    SurfaceUpdate(SurfaceUpdate),
    DataModelUpdate(DataModelUpdate),
    DeleteSurface(DeleteSurface),
}

impl ServerAction {
    pub fn kind(&self) -> MessageKind {
        match self {
            ServerAction::BeginRendering(_) => MessageKind::BeginRendering,
            ServerAction::SurfaceUpdate(_) => MessageKind::SurfaceUpdate,
            ServerAction::DataModelUpdate(_) => MessageKind::DataModelUpdate,
            ServerAction::DeleteSurface(_) => MessageKind::DeleteSurface,
        }
    }

    /// The surface this action targets.
    pub fn surface_id(&self) -> &str {
        match self {
            ServerAction::BeginRendering(m) => &m.surface_id,
            ServerAction::SurfaceUpdate(m) => &m.surface_id,
            ServerAction::DataModelUpdate(m) => &m.surface_id,
            ServerAction::DeleteSurface(m) => &m.surface_id,
        }
    }
}

impl ServerToClientMessage {
    /// All populated fields, in precedence order.
    pub fn populated_kinds(&self) -> Vec<MessageKind> {
        let mut kinds = Vec::with_capacity(1);
        if self.begin_rendering.is_some() {
            kinds.push(MessageKind::BeginRendering);
        }
        if self.surface_update.is_some() {
            kinds.push(MessageKind::SurfaceUpdate);
        }
        if self.data_model_update.is_some() {
            kinds.push(MessageKind::DataModelUpdate);
        }
        if self.delete_surface.is_some() {
            kinds.push(MessageKind::DeleteSurface);
        }
        kinds
    }

    /// Select the action to apply, discarding any lower-precedence fields.
    ///
    /// Returns `None` when no field is populated.
    pub fn into_action(self) -> Option<ServerAction> {
        if let Some(m) = self.begin_rendering {
            Some(ServerAction::BeginRendering(m))
        } else if let Some(m) = self.surface_update {
            Some(ServerAction::SurfaceUpdate(m))
        } else if let Some(m) = self.data_model_update {
            Some(ServerAction::DataModelUpdate(m))
        } else {
            self.delete_surface.map(ServerAction::DeleteSurface)
        }
    }
}

impl From<ServerAction> for ServerToClientMessage {
    fn from(action: ServerAction) -> Self {
        let mut message = ServerToClientMessage::default();
        match action {
            ServerAction::BeginRendering(m) => message.begin_rendering = Some(m),
            ServerAction::SurfaceUpdate(m) => message.surface_update = Some(m),
            ServerAction::DataModelUpdate(m) => message.data_model_update = Some(m),
            ServerAction::DeleteSurface(m) => message.delete_surface = Some(m),
        }
        message
    }
}

/// Signals the client to begin rendering a surface from a root component.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct BeginRendering {
    /// The surface to render.
    pub surface_id: String,

    /// Id of the root component.
    pub root: String,

    /// Component catalog for this surface.
    ///
    /// When omitted the client falls back to the standard catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<String>,

    /// Opaque styling hints, passed through to the renderer unmodified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "Record<string, unknown> | null")]
    pub styles: Option<Map<String, Value>>,
}

impl BeginRendering {
    pub fn new(surface_id: impl Into<String>, root: impl Into<String>) -> Self {
        Self {
            surface_id: surface_id.into(),
            root: root.into(),
            catalog_id: None,
            styles: None,
        }
    }
}

/// Adds or replaces component definitions on a surface.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceUpdate {
    pub surface_id: String,
    pub components: Vec<ComponentDefinition>,
}

/// Wire description of a single component.
///
/// `component` is a wrapper object that must contain exactly one key, the
/// component type, whose value holds the component's properties:
///
/// ```json
/// {"id": "greeting", "weight": 1, "component": {"Text": {"text": {"path": "name"}}}}
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDefinition {
    pub id: String,

    /// Relative weight inside a Row or Column (flex-grow).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    #[ts(type = "Record<string, Record<string, unknown>>")]
    pub component: Map<String, Value>,
}

impl ComponentDefinition {
    pub fn new(id: impl Into<String>, component_type: &str, properties: Value) -> Self {
        let mut component = Map::new();
        component.insert(component_type.to_string(), properties);
        Self {
            id: id.into(),
            weight: None,
            component,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }
}

/// Writes typed entries into a surface's data model.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct DataModelUpdate {
    pub surface_id: String,

    /// Location to write at. Omitted or `/` replaces the whole model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    pub contents: Vec<DataEntry>,
}

/// A key plus exactly one typed value.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct DataEntry {
    pub key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_string: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_number: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_boolean: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_map: Option<Vec<DataEntry>>,
}

impl DataEntry {
    fn empty(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value_string: None,
            value_number: None,
            value_boolean: None,
            value_map: None,
        }
    }

    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            value_string: Some(value.into()),
            ..Self::empty(key)
        }
    }

    pub fn number(key: impl Into<String>, value: f64) -> Self {
        Self {
            value_number: Some(value),
            ..Self::empty(key)
        }
    }

    pub fn boolean(key: impl Into<String>, value: bool) -> Self {
        Self {
            value_boolean: Some(value),
            ..Self::empty(key)
        }
    }

    pub fn map(key: impl Into<String>, entries: Vec<DataEntry>) -> Self {
        Self {
            value_map: Some(entries),
            ..Self::empty(key)
        }
    }

    /// Number of populated value fields. Well-formed entries have exactly one.
    pub fn value_count(&self) -> usize {
        usize::from(self.value_string.is_some())
            + usize::from(self.value_number.is_some())
            + usize::from(self.value_boolean.is_some())
            + usize::from(self.value_map.is_some())
    }
}

/// Removes a surface and all of its state.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSurface {
    pub surface_id: String,
}
