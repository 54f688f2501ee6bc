//! Surfaces: independently lifecycled rendering contexts.
//!
//! This module provides:
//! - The `Surface` record owned by the message processor
//! - Component nodes and decoded property values
//! - Binding-aware reads and the render tree walker

pub mod component;
pub mod tree;

pub use component::{ComponentNode, PropertyValue};
pub use tree::{ChildRef, NodeStatus, RenderNode};

use crate::data_model::DataModel;
use crate::path::resolve_path;
use a2ui_protocol::bindings::Binding;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// A named rendering context with its own components and data model.
///
/// Surfaces are created lazily by the first message naming them and live
/// until a `deleteSurface` message removes them.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pub id: String,

    /// Set by `beginRendering`.
    pub root_component_id: Option<String>,

    pub catalog_id: String,

    /// Opaque styling hints passed through from `beginRendering`.
    pub styles: Option<Map<String, Value>>,

    /// Component registry, keyed by component id.
    pub components: HashMap<String, ComponentNode>,

    pub data_model: DataModel,

    /// True once a `beginRendering` message has been applied.
    pub is_ready_to_render: bool,
}

impl Surface {
    pub fn new(id: impl Into<String>, catalog_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            root_component_id: None,
            catalog_id: catalog_id.into(),
            styles: None,
            components: HashMap::new(),
            data_model: DataModel::new(),
            is_ready_to_render: false,
        }
    }

    pub fn component(&self, id: &str) -> Option<&ComponentNode> {
        self.components.get(id)
    }

    /// The root component, once declared and defined.
    pub fn root_component(&self) -> Option<&ComponentNode> {
        self.root_component_id
            .as_deref()
            .and_then(|id| self.component(id))
    }

    /// Read a data value, resolving `path` against `context_path` first.
    pub fn get_data(&self, path: &str, context_path: Option<&str>) -> Option<&Value> {
        self.data_model.get(&resolve_path(path, context_path))
    }

    /// The concrete value of a binding.
    ///
    /// Literals evaluate to themselves; paths are resolved against
    /// `context_path` and read from the data model.
    pub fn resolve_binding(&self, binding: &Binding, context_path: Option<&str>) -> Option<Value> {
        match binding {
            Binding::Literal(literal) => Some(literal.to_json()),
            Binding::Path(path) => self.get_data(path, context_path).cloned(),
        }
    }

    /// The concrete value of a property, in the context of `context_path`.
    ///
    /// Raw values are passed through; children specifications have no value.
    pub fn resolve_value(&self, value: &PropertyValue, context_path: Option<&str>) -> Option<Value> {
        match value {
            PropertyValue::Bound(binding) => self.resolve_binding(binding, context_path),
            PropertyValue::Raw(raw) => Some(raw.clone()),
            PropertyValue::Children(_) => None,
        }
    }

    /// The concrete value of `node`'s property `name`, resolved against the
    /// node's own data context.
    pub fn resolve_property(&self, node: &ComponentNode, name: &str) -> Option<Value> {
        let value = node.property(name)?;
        self.resolve_value(value, node.data_context_path.as_deref())
    }
}
