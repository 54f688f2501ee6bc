//! Component property shapes: bound values, children and actions.
//!
//! Component properties arrive as loosely typed JSON. The shapes here give
//! the recognized ones a closed, strongly typed form:
//!
//! - [`BoundValue`] is the wire object `{"literalString": ..}` / `{"path": ..}`
//!   and [`Binding`] is its validated form (literal XOR path).
//! - [`Children`] is either an explicit id list or a data-bound template.
//! - [`ComponentAction`] is the `action` property of interactive components.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use ts_rs::TS;

/// Wire form of a value that is either a literal or a data-model path.
///
/// A well-formed object carries exactly one of the literal fields or a
/// `path`. Objects carrying both are tolerated: the literal wins.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct BoundValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal_string: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal_number: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal_boolean: Option<bool>,

    /// Path into the data model, absolute (`/user/name`) or relative (`name`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl BoundValue {
    /// The JSON keys a bound value object may contain.
    pub const KEYS: [&'static str; 4] = ["literalString", "literalNumber", "literalBoolean", "path"];

    pub fn has_literal(&self) -> bool {
        self.literal_string.is_some() || self.literal_number.is_some() || self.literal_boolean.is_some()
    }

    pub fn has_path(&self) -> bool {
        self.path.is_some()
    }

    /// True when both a literal and a path are present.
    pub fn is_ambiguous(&self) -> bool {
        self.has_literal() && self.has_path()
    }
}

/// A literal scalar carried by a component property.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Number(f64),
    Boolean(bool),
}

impl Literal {
    pub fn to_json(&self) -> Value {
        match self {
            Literal::String(s) => Value::String(s.clone()),
            Literal::Number(n) => number_to_json(*n),
            Literal::Boolean(b) => Value::Bool(*b),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Convert a wire number to JSON, keeping integral values integral.
///
/// The wire carries every number as a double; `36` should still read back
/// as `36`, not `36.0`. Non-finite values become `null`.
pub fn number_to_json(n: f64) -> Value {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

/// Validated bound value: a literal or a data-model path, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    Literal(Literal),
    Path(String),
}

/// Raised when a bound value carries neither a literal nor a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyBinding;

impl fmt::Display for EmptyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("bound value has neither a literal nor a path")
    }
}

impl std::error::Error for EmptyBinding {}

impl TryFrom<BoundValue> for Binding {
    type Error = EmptyBinding;

    fn try_from(value: BoundValue) -> Result<Self, Self::Error> {
        if let Some(s) = value.literal_string {
            Ok(Binding::Literal(Literal::String(s)))
        } else if let Some(n) = value.literal_number {
            Ok(Binding::Literal(Literal::Number(n)))
        } else if let Some(b) = value.literal_boolean {
            Ok(Binding::Literal(Literal::Boolean(b)))
        } else if let Some(path) = value.path {
            Ok(Binding::Path(path))
        } else {
            Err(EmptyBinding)
        }
    }
}

impl From<Binding> for BoundValue {
    fn from(binding: Binding) -> Self {
        let mut value = BoundValue::default();
        match binding {
            Binding::Literal(Literal::String(s)) => value.literal_string = Some(s),
            Binding::Literal(Literal::Number(n)) => value.literal_number = Some(n),
            Binding::Literal(Literal::Boolean(b)) => value.literal_boolean = Some(b),
            Binding::Path(p) => value.path = Some(p),
        }
        value
    }
}

impl Binding {
    pub fn path(path: impl Into<String>) -> Self {
        Binding::Path(path.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Binding::Literal(Literal::String(value.into()))
    }
}

/// Children of a container component.
///
/// Serialized externally tagged, matching the wire format:
///
/// ```json
/// {"explicitList": ["a", "b"]}
/// {"template": {"componentId": "row", "dataBinding": "/items"}}
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub enum Children {
    /// Ordered ids of the direct children.
    ExplicitList(Vec<String>),

    /// One child per element of a data-model collection.
    Template(ChildrenTemplate),
}

impl Children {
    /// The JSON keys that mark an object as a children specification.
    pub const KEYS: [&'static str; 2] = ["explicitList", "template"];
}

/// Template for data-driven children.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct ChildrenTemplate {
    /// Component repeated once per element.
    pub component_id: String,

    /// Path to the collection in the data model.
    pub data_binding: String,
}

/// Action attached to an interactive component such as a Button.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct ComponentAction {
    pub name: String,

    /// Values sent along with the action, resolved at dispatch time.
    #[serde(default)]
    pub context: Vec<ActionContextEntry>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct ActionContextEntry {
    pub key: String,
    pub value: BoundValue,
}
