//! Runtime notifications.
//!
//! The message processor does not call into a renderer directly. Instead it
//! emits an [`Event`] on a channel registered by the owning runtime whenever
//! observable state changes, and the renderer (or a logger) reacts.
//!
//! Uses tagged enum serialization for TypeScript compatibility:
//! ```json
//! {
//!   "type": "surfaceUpdated",
//!   "payload": { "surface_id": "main" }
//! }
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Events sent from the message processor to its observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Event {
    /// A surface's components, data model or render settings changed.
    ///
    /// Observers should re-read the surface.
    SurfaceUpdated { surface_id: String },

    /// A surface was removed along with all its state.
    SurfaceDeleted { surface_id: String },

    /// A data-model write went through a non-mapping value and replaced it
    /// with an empty mapping.
    ///
    /// `path` is the full write path, `segment` the prefix that was replaced.
    DataPathConflict {
        surface_id: String,
        path: String,
        segment: String,
    },
}

impl Event {
    /// The surface the event refers to.
    pub fn surface_id(&self) -> &str {
        match self {
            Event::SurfaceUpdated { surface_id }
            | Event::SurfaceDeleted { surface_id }
            | Event::DataPathConflict { surface_id, .. } => surface_id,
        }
    }
}
