//! Data-binding path resolution.
//!
//! Paths address the data model with `/`-separated segments. A binding path
//! is either absolute (`/user/name`) or relative (`name`), in which case it
//! is interpreted against the data context of the component reading it. A
//! template-expanded list item, for instance, has the element path
//! (`/items/0`) as its context, so `name` resolves to `/items/0/name`.

/// The root path, addressing the whole data model.
pub const ROOT: &str = "/";

/// Turn a binding path plus an optional data context into an absolute path.
///
/// - Absolute paths are returned unchanged, whatever the context.
/// - `""` and `"."` mean the current context (or `/` without one).
/// - Relative paths are appended to a non-root context with exactly one `/`
///   between them, and otherwise made absolute under `/`.
///
/// # Example
///
/// ```
/// use a2ui_core::path::resolve_path;
///
/// assert_eq!(resolve_path("/a", Some("/ctx")), "/a");
/// assert_eq!(resolve_path(".", Some("/a/b")), "/a/b");
/// assert_eq!(resolve_path("x", Some("/a/b/")), "/a/b/x");
/// assert_eq!(resolve_path("x", None), "/x");
/// ```
pub fn resolve_path(path: &str, context_path: Option<&str>) -> String {
    if path.starts_with('/') {
        return path.to_string();
    }

    if path.is_empty() || path == "." {
        return context_path.unwrap_or(ROOT).to_string();
    }

    match context_path {
        Some(context) if !context.is_empty() && context != ROOT => {
            if context.ends_with('/') {
                format!("{context}{path}")
            } else {
                format!("{context}/{path}")
            }
        }
        _ => format!("/{path}"),
    }
}

/// Split a path into its non-empty segments.
///
/// `/`, `""` and paths made only of slashes yield no segments, i.e. the root.
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// True when `path` addresses the whole data model.
pub fn is_root(path: &str) -> bool {
    segments(path).is_empty()
}

/// Append one segment to an absolute path.
pub fn join(base: &str, segment: &str) -> String {
    if base.ends_with('/') {
        format!("{base}{segment}")
    } else {
        format!("{base}/{segment}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_path_ignores_context() {
        for context in [None, Some("/"), Some("/a/b"), Some("/a/b/")] {
            assert_eq!(resolve_path("/x/y", context), "/x/y");
            assert_eq!(resolve_path("/", context), "/");
        }
    }

    #[test]
    fn test_current_context_shorthand() {
        assert_eq!(resolve_path(".", Some("/a/b")), "/a/b");
        assert_eq!(resolve_path("", Some("/a/b")), "/a/b");
        assert_eq!(resolve_path("", None), "/");
        assert_eq!(resolve_path(".", None), "/");
    }

    #[test]
    fn test_relative_path_joins_context() {
        assert_eq!(resolve_path("x", Some("/a/b")), "/a/b/x");
        assert_eq!(resolve_path("x", Some("/a/b/")), "/a/b/x");
        assert_eq!(resolve_path("x/y", Some("/a")), "/a/x/y");
    }

    #[test]
    fn test_relative_path_without_context_is_rooted() {
        assert_eq!(resolve_path("x", None), "/x");
        assert_eq!(resolve_path("x", Some("/")), "/x");
        assert_eq!(resolve_path("x", Some("")), "/x");
    }

    #[test]
    fn test_segments_skip_empty_parts() {
        assert!(segments("/").is_empty());
        assert!(segments("").is_empty());
        assert_eq!(segments("/a/b"), vec!["a", "b"]);
        assert_eq!(segments("a//b/"), vec!["a", "b"]);
        assert!(is_root("//"));
        assert!(!is_root("/a"));
    }

    #[test]
    fn test_join() {
        assert_eq!(join("/", "items"), "/items");
        assert_eq!(join("/items", "0"), "/items/0");
    }
}
