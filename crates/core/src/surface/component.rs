//! Component nodes and their decoded property values.

use crate::error::ShapeError;
use a2ui_protocol::bindings::{Binding, BoundValue, Children, ComponentAction, Literal};
use a2ui_protocol::server_messages::ComponentDefinition;
use serde_json::Value;
use std::collections::BTreeMap;

/// A decoded component property.
///
/// Plain JSON scalars and `{"literal*": ..}` / `{"path": ..}` objects become
/// [`PropertyValue::Bound`]; `{"explicitList": ..}` / `{"template": ..}`
/// become [`PropertyValue::Children`]. Anything else (actions, arrays,
/// free-form objects) is kept as [`PropertyValue::Raw`].
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Bound(Binding),
    Children(Children),
    Raw(Value),
}

impl PropertyValue {
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::String(s) => PropertyValue::Bound(Binding::Literal(Literal::String(s))),
            Value::Bool(b) => PropertyValue::Bound(Binding::Literal(Literal::Boolean(b))),
            Value::Number(n) => match n.as_f64() {
                Some(f) => PropertyValue::Bound(Binding::Literal(Literal::Number(f))),
                None => PropertyValue::Raw(Value::Number(n)),
            },
            Value::Object(ref map) if map.len() == 1 && map.keys().all(|k| Children::KEYS.contains(&k.as_str())) => {
                match serde_json::from_value::<Children>(value.clone()) {
                    Ok(children) => PropertyValue::Children(children),
                    Err(_) => PropertyValue::Raw(value),
                }
            }
            Value::Object(ref map) if !map.is_empty() && map.keys().all(|k| BoundValue::KEYS.contains(&k.as_str())) => {
                match decode_binding(&value) {
                    Some(binding) => PropertyValue::Bound(binding),
                    None => PropertyValue::Raw(value),
                }
            }
            other => PropertyValue::Raw(other),
        }
    }

    pub fn as_binding(&self) -> Option<&Binding> {
        match self {
            PropertyValue::Bound(binding) => Some(binding),
            _ => None,
        }
    }

    pub fn as_children(&self) -> Option<&Children> {
        match self {
            PropertyValue::Children(children) => Some(children),
            _ => None,
        }
    }

    /// The literal string, if this is a string literal (e.g. a child id).
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Bound(Binding::Literal(literal)) => literal.as_str(),
            _ => None,
        }
    }
}

fn decode_binding(value: &Value) -> Option<Binding> {
    let bound: BoundValue = serde_json::from_value(value.clone()).ok()?;
    if bound.is_ambiguous() {
        tracing::warn!(value = %value, "bound value carries both a literal and a path; using the literal");
    }
    Binding::try_from(bound).ok()
}

/// A component in a surface's registry.
///
/// Children are referenced by id only. The registry never links nodes
/// together, so a child id may name a component that has not arrived yet.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentNode {
    pub id: String,

    /// The type key from the wire wrapper, e.g. `Text` or `Column`.
    pub component_type: String,

    pub properties: BTreeMap<String, PropertyValue>,

    /// Layout weight inside a Row or Column, uninterpreted here.
    pub weight: Option<f64>,

    /// Context for relative bindings.
    ///
    /// Never set by the message processor; tree walkers set it on the nodes
    /// they instantiate (see [`crate::surface::Surface::instantiate`]).
    pub data_context_path: Option<String>,
}

impl ComponentNode {
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// The `children` property, if it is a children specification.
    pub fn children(&self) -> Option<&Children> {
        self.property("children").and_then(PropertyValue::as_children)
    }

    /// The `action` property, if present and well-formed.
    pub fn action(&self) -> Option<ComponentAction> {
        match self.property("action")? {
            PropertyValue::Raw(value) => serde_json::from_value(value.clone()).ok(),
            _ => None,
        }
    }

    pub fn with_data_context(mut self, path: Option<String>) -> Self {
        self.data_context_path = path;
        self
    }
}

impl TryFrom<ComponentDefinition> for ComponentNode {
    type Error = ShapeError;

    /// Extract the single type tag and decode the property bag.
    fn try_from(definition: ComponentDefinition) -> Result<Self, Self::Error> {
        let ComponentDefinition {
            id,
            weight,
            component,
        } = definition;

        if component.len() > 1 {
            return Err(ShapeError::MultipleComponentTypes {
                component_id: id,
                types: component.keys().cloned().collect(),
            });
        }

        let Some((component_type, raw_properties)) = component.into_iter().next() else {
            return Err(ShapeError::MissingComponentType { component_id: id });
        };

        let properties = match raw_properties {
            Value::Object(map) => map
                .into_iter()
                .map(|(name, value)| (name, PropertyValue::from_json(value)))
                .collect(),
            Value::Null => BTreeMap::new(),
            _ => {
                return Err(ShapeError::InvalidProperties {
                    component_id: id,
                    component_type,
                })
            }
        };

        Ok(ComponentNode {
            id,
            component_type,
            properties,
            weight,
            data_context_path: None,
        })
    }
}
