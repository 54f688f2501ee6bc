//! Runtime configuration models.
//!
//! This module provides the `RuntimeConfig` structure read from
//! `.a2ui/config.toml`. Every field has a default, so an absent file or an
//! empty one yields a usable configuration.

use crate::surface::tree::DEFAULT_MAX_DEPTH;
use a2ui_protocol::constants::STANDARD_CATALOG_ID;
use serde::{Deserialize, Serialize};

/// Settings for the message processor and tree walker.
///
/// # Example
///
/// ```toml
/// # .a2ui/config.toml
/// catalog-id = "https://example.com/catalogs/custom.json"
/// report-path-conflicts = false
/// max-tree-depth = 32
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct RuntimeConfig {
    /// Catalog assigned by `beginRendering` messages that omit `catalogId`.
    pub catalog_id: String,

    /// Emit `Event::DataPathConflict` when a write replaces a non-object.
    pub report_path_conflicts: bool,

    /// Depth at which the render tree walk stops descending.
    pub max_tree_depth: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            catalog_id: STANDARD_CATALOG_ID.to_string(),
            report_path_conflicts: true,
            max_tree_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
