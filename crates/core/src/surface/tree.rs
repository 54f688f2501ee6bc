//! Reading a surface as a tree.
//!
//! The registry is flat; the tree only exists when a reader walks it from
//! the root, looking children up by id. Template children are expanded here,
//! at read time, from the current contents of the data model: each element
//! of the bound collection yields one child whose data context is the
//! element's own path.

use super::{ComponentNode, PropertyValue, Surface};
use crate::path::{join, resolve_path};
use a2ui_protocol::bindings::{Children, ChildrenTemplate};
use serde::Serialize;
use serde_json::{Map, Value};

/// Default depth guard for [`Surface::render_tree`].
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// A reference from a parent to one of its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildRef {
    pub component_id: String,

    /// Data context the child is read in.
    pub data_context_path: Option<String>,

    /// Key or index of the collection element, for template children.
    pub item_key: Option<String>,
}

impl ChildRef {
    fn fixed(component_id: &str, context_path: Option<&str>) -> Self {
        Self {
            component_id: component_id.to_string(),
            data_context_path: context_path.map(str::to_string),
            item_key: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeStatus {
    Resolved,
    /// The id is referenced but not defined (yet).
    Missing,
    /// The id already appears among this node's ancestors.
    Cycle,
    /// The walk stopped at the configured maximum depth.
    DepthLimit,
}

/// Snapshot of one node of the walked tree, with bindings resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderNode {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,

    pub status: NodeStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_context_path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_key: Option<String>,

    /// Property values with bindings resolved. Unresolvable bindings and
    /// children specifications are omitted.
    pub properties: Map<String, Value>,

    pub children: Vec<RenderNode>,
}

impl RenderNode {
    fn unresolved(child: &ChildRef, status: NodeStatus) -> Self {
        Self {
            id: child.component_id.clone(),
            component_type: None,
            status,
            weight: None,
            data_context_path: child.data_context_path.clone(),
            item_key: child.item_key.clone(),
            properties: Map::new(),
            children: Vec::new(),
        }
    }

    /// Number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(RenderNode::node_count).sum::<usize>()
    }

    /// Depth-first search for a node by id.
    pub fn find(&self, id: &str) -> Option<&RenderNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }
}

impl Surface {
    /// Expand a template against the data model.
    ///
    /// Arrays yield one child per index, objects one child per key in
    /// insertion order. Anything else (including a missing path) yields none.
    pub fn expand_template(&self, template: &ChildrenTemplate, context_path: Option<&str>) -> Vec<ChildRef> {
        let collection_path = resolve_path(&template.data_binding, context_path);
        let keys: Vec<String> = match self.data_model.get(&collection_path) {
            Some(Value::Array(items)) => (0..items.len()).map(|i| i.to_string()).collect(),
            Some(Value::Object(map)) => map.keys().cloned().collect(),
            _ => return Vec::new(),
        };

        keys.into_iter()
            .map(|key| ChildRef {
                component_id: template.component_id.clone(),
                data_context_path: Some(join(&collection_path, &key)),
                item_key: Some(key),
            })
            .collect()
    }

    /// Direct children of `node`, read in `context_path`.
    ///
    /// Children come from, in order: the `children` specification, the
    /// `child` property, other `*Child` properties (alphabetically), and the
    /// `child` of each `tabItems` entry. Fixed children inherit the parent's
    /// context; template children get their element's path.
    pub fn child_refs(&self, node: &ComponentNode, context_path: Option<&str>) -> Vec<ChildRef> {
        let mut refs = Vec::new();

        match node.children() {
            Some(Children::ExplicitList(ids)) => {
                refs.extend(ids.iter().map(|id| ChildRef::fixed(id, context_path)));
            }
            Some(Children::Template(template)) => {
                refs.extend(self.expand_template(template, context_path));
            }
            None => {}
        }

        if let Some(id) = node.property("child").and_then(PropertyValue::as_str) {
            refs.push(ChildRef::fixed(id, context_path));
        }

        for (name, value) in &node.properties {
            if name != "child" && name.ends_with("Child") {
                if let Some(id) = value.as_str() {
                    refs.push(ChildRef::fixed(id, context_path));
                }
            }
        }

        if let Some(PropertyValue::Raw(Value::Array(items))) = node.property("tabItems") {
            refs.extend(
                items
                    .iter()
                    .filter_map(|item| item.get("child").and_then(Value::as_str))
                    .map(|id| ChildRef::fixed(id, context_path)),
            );
        }

        refs
    }

    /// Registry node for `child`, with its data context set.
    ///
    /// Returns `None` for dangling ids.
    pub fn instantiate(&self, child: &ChildRef) -> Option<ComponentNode> {
        self.component(&child.component_id)
            .cloned()
            .map(|node| node.with_data_context(child.data_context_path.clone()))
    }

    /// Walk the surface from its root and snapshot the resulting tree.
    ///
    /// Returns `None` until a root has been declared. A declared but not yet
    /// defined root yields a single `Missing` node.
    pub fn render_tree(&self, max_depth: usize) -> Option<RenderNode> {
        let root_id = self.root_component_id.as_deref()?;
        let root = ChildRef::fixed(root_id, None);
        let mut ancestors = Vec::new();
        Some(self.walk(&root, 0, max_depth, &mut ancestors))
    }

    /// `ancestors` holds `(component id, data context)` pairs: a template
    /// may repeat its own component as long as each instance reads a
    /// different part of the data model.
    fn walk(
        &self,
        child: &ChildRef,
        depth: usize,
        max_depth: usize,
        ancestors: &mut Vec<(String, Option<String>)>,
    ) -> RenderNode {
        let repeated = ancestors
            .iter()
            .any(|(id, context)| *id == child.component_id && *context == child.data_context_path);
        if repeated {
            tracing::debug!(surface_id = %self.id, component_id = %child.component_id, "component cycle");
            return RenderNode::unresolved(child, NodeStatus::Cycle);
        }
        if depth >= max_depth {
            return RenderNode::unresolved(child, NodeStatus::DepthLimit);
        }
        let Some(node) = self.instantiate(child) else {
            return RenderNode::unresolved(child, NodeStatus::Missing);
        };

        let context_path = node.data_context_path.as_deref();
        let properties = node
            .properties
            .iter()
            .filter_map(|(name, value)| {
                self.resolve_value(value, context_path)
                    .map(|resolved| (name.clone(), resolved))
            })
            .collect();

        ancestors.push((node.id.clone(), node.data_context_path.clone()));
        let children = self
            .child_refs(&node, context_path)
            .iter()
            .map(|grandchild| self.walk(grandchild, depth + 1, max_depth, ancestors))
            .collect();
        ancestors.pop();

        RenderNode {
            id: node.id,
            component_type: Some(node.component_type),
            status: NodeStatus::Resolved,
            weight: node.weight,
            data_context_path: node.data_context_path,
            item_key: child.item_key.clone(),
            properties,
            children,
        }
    }
}
