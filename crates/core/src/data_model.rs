//! Hierarchical per-surface data store.
//!
//! The data model is a tree of nested JSON objects rooted at `/`. Values are
//! addressed by slash-separated paths (see [`crate::path`]).
//!
//! Write semantics:
//! - Writing the root path replaces the whole store (clear, then repopulate
//!   from the written object). It never merges.
//! - Writing any other path creates missing intermediate objects. A numeric
//!   segment steps into an existing array when the index is in range. Any
//!   other non-object value in the way is replaced by an empty object; the
//!   write reports this as a [`PathConflict`].
//!
//! Reads never fail: a missing path, or one that runs through a scalar,
//! yields `None`. Reads may step into arrays with numeric segments
//! (`/items/0/name`), which is how template-expanded list items address
//! their element.

use crate::path;
use serde_json::{Map, Value};

/// A non-object value that a write had to replace to reach its target.
#[derive(Debug, Clone, PartialEq)]
pub struct PathConflict {
    /// Absolute path of the replaced value, e.g. `/user` for a write to
    /// `/user/name` when `/user` held a string.
    pub segment: String,

    /// The value that was discarded.
    pub replaced: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataModel {
    root: Value,
}

impl Default for DataModel {
    fn default() -> Self {
        Self {
            root: Value::Object(Map::new()),
        }
    }
}

impl DataModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the value at `path`.
    ///
    /// `/` and `""` return the whole store as an object.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut current = &self.root;
        for segment in path::segments(path) {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Write `value` at `path`.
    ///
    /// Numeric segments step into existing arrays when in range, the same
    /// way reads do. Returns the conflict, if any, where another non-object
    /// value was overwritten to make room for the write.
    pub fn set(&mut self, path: &str, value: Value) -> Option<PathConflict> {
        let segments = path::segments(path);
        let Some((last, parents)) = segments.split_last() else {
            self.replace_root(value);
            return None;
        };

        let mut conflict = None;
        let mut walked = String::new();
        let mut current = &mut self.root;

        for segment in parents {
            current = child_mut(current, segment, &walked, &mut conflict);
            walked.push('/');
            walked.push_str(segment);
        }

        *child_mut(current, last, &walked, &mut conflict) = value;
        conflict
    }

    /// Remove the value at `path`, returning it.
    ///
    /// Removing the root clears the store.
    pub fn remove(&mut self, path: &str) -> Option<Value> {
        let segments = path::segments(path);
        let Some((last, parents)) = segments.split_last() else {
            let previous = std::mem::replace(&mut self.root, Value::Object(Map::new()));
            return Some(previous);
        };

        let mut current = self.root.as_object_mut()?;
        for segment in parents {
            current = current.get_mut(*segment)?.as_object_mut()?;
        }
        current.shift_remove(*last)
    }

    /// The whole store.
    pub fn as_map(&self) -> &Map<String, Value> {
        match &self.root {
            Value::Object(map) => map,
            _ => unreachable!("data model root is always an object"),
        }
    }

    /// The whole store as a JSON value.
    pub fn as_value(&self) -> &Value {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.as_map().is_empty()
    }

    pub fn clear(&mut self) {
        self.root = Value::Object(Map::new());
    }

    fn replace_root(&mut self, value: Value) {
        match value {
            Value::Object(map) => self.root = Value::Object(map),
            other => {
                tracing::debug!(value = %other, "root write with a non-object value clears the data model");
                self.clear();
            }
        }
    }
}

/// Coerce `value` into an object, discarding whatever it held before.
/// The slot for `segment` inside `container`, creating it if needed.
///
/// `container_path` is the absolute path of `container`, used to report a
/// conflict when `container` has to be replaced by an object.
fn child_mut<'a>(
    container: &'a mut Value,
    segment: &str,
    container_path: &str,
    conflict: &mut Option<PathConflict>,
) -> &'a mut Value {
    let index = match &*container {
        Value::Array(items) => segment.parse::<usize>().ok().filter(|i| *i < items.len()),
        _ => None,
    };

    match (container, index) {
        (Value::Array(items), Some(i)) => &mut items[i],
        (container, _) => {
            if !container.is_object() && conflict.is_none() {
                *conflict = Some(PathConflict {
                    segment: container_path.to_string(),
                    replaced: container.clone(),
                });
            }
            ensure_object(container)
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()))
        }
    }
}

fn ensure_object(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just replaced with an object"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_root_write_then_read() {
        let mut model = DataModel::new();
        model.set("/", json!({"k": "v"}));

        assert_eq!(model.get("/k"), Some(&json!("v")));
        assert_eq!(model.get("/"), Some(&json!({"k": "v"})));
        assert_eq!(model.get(""), Some(&json!({"k": "v"})));
    }

    #[test]
    fn test_root_write_replaces_previous_contents() {
        let mut model = DataModel::new();
        model.set("/", json!({"old": 1, "shared": "a"}));
        model.set("/", json!({"new": 2}));

        assert_eq!(model.get("/old"), None);
        assert_eq!(model.get("/shared"), None);
        assert_eq!(model.get("/new"), Some(&json!(2)));
    }

    #[test]
    fn test_root_write_with_scalar_clears() {
        let mut model = DataModel::new();
        model.set("/", json!({"a": 1}));
        model.set("", json!("scalar"));

        assert!(model.is_empty());
        assert_eq!(model.get("/"), Some(&json!({})));
    }

    #[test]
    fn test_nested_write_creates_intermediates() {
        let mut model = DataModel::new();
        let conflict = model.set("/a/b/c", json!(true));

        assert!(conflict.is_none());
        let b = model.get("/a/b").expect("intermediate mapping");
        assert!(b.is_object());
        assert_eq!(b.get("c"), Some(&json!(true)));
    }

    #[test]
    fn test_subtree_write_keeps_siblings() {
        let mut model = DataModel::new();
        model.set("/", json!({"user": {"name": "Ada", "age": 36}, "theme": "dark"}));
        model.set("/user/name", json!("Grace"));

        assert_eq!(model.get("/user/name"), Some(&json!("Grace")));
        assert_eq!(model.get("/user/age"), Some(&json!(36)));
        assert_eq!(model.get("/theme"), Some(&json!("dark")));
    }

    #[test]
    fn test_write_through_scalar_overwrites_and_reports() {
        let mut model = DataModel::new();
        model.set("/user", json!("not a map"));
        let conflict = model.set("/user/name", json!("Ada")).expect("conflict reported");

        assert_eq!(conflict.segment, "/user");
        assert_eq!(conflict.replaced, json!("not a map"));
        assert_eq!(model.get("/user"), Some(&json!({"name": "Ada"})));
    }

    #[test]
    fn test_missing_and_scalar_traversal_read_as_absent() {
        let mut model = DataModel::new();
        model.set("/", json!({"name": "Ada"}));

        assert_eq!(model.get("/missing"), None);
        assert_eq!(model.get("/name/first"), None);
    }

    #[test]
    fn test_read_into_array_elements() {
        let mut model = DataModel::new();
        model.set("/items", json!([{"name": "a"}, {"name": "b"}]));

        assert_eq!(model.get("/items/1/name"), Some(&json!("b")));
        assert_eq!(model.get("/items/7"), None);
        assert_eq!(model.get("/items/x"), None);
    }

    #[test]
    fn test_write_into_array_element_keeps_siblings() {
        let mut model = DataModel::new();
        model.set("/items", json!([{"name": "a"}, {"name": "b"}]));

        let conflict = model.set("/items/1/name", json!("B"));

        assert!(conflict.is_none());
        assert_eq!(model.get("/items"), Some(&json!([{"name": "a"}, {"name": "B"}])));

        model.set("/items/0", json!({"name": "A"}));
        assert_eq!(model.get("/items/0/name"), Some(&json!("A")));
        assert_eq!(model.get("/items/1/name"), Some(&json!("B")));
    }

    #[test]
    fn test_write_past_array_end_replaces_and_reports() {
        let mut model = DataModel::new();
        model.set("/items", json!(["only"]));

        let conflict = model.set("/items/5/name", json!("x")).expect("conflict reported");

        assert_eq!(conflict.segment, "/items");
        assert_eq!(conflict.replaced, json!(["only"]));
        assert_eq!(model.get("/items/5/name"), Some(&json!("x")));
    }

    #[test]
    fn test_trailing_slash_is_ignored() {
        let mut model = DataModel::new();
        model.set("/a/b/", json!(1));
        assert_eq!(model.get("/a/b"), Some(&json!(1)));
    }

    #[test]
    fn test_remove() {
        let mut model = DataModel::new();
        model.set("/", json!({"a": {"b": 1, "c": 2}}));

        assert_eq!(model.remove("/a/b"), Some(json!(1)));
        assert_eq!(model.get("/a"), Some(&json!({"c": 2})));
        assert_eq!(model.remove("/a/missing"), None);

        model.remove("/");
        assert!(model.is_empty());
    }

    #[test]
    fn test_object_order_is_insertion_order() {
        let mut model = DataModel::new();
        model.set("/", json!({}));
        model.set("/z", json!(1));
        model.set("/a", json!(2));
        model.set("/m", json!(3));

        let keys: Vec<&String> = model.as_map().keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }
}
