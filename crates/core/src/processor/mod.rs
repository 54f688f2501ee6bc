//! The message processor.
//!
//! The MessageProcessor is the single owner of all live surfaces. It applies
//! server-to-client messages in arrival order, keeps each surface's component
//! registry and data model up to date, and tells its observer (if any) about
//! every change through an [`Event`] channel.
//!
//! All mutation is synchronous and in memory. Callers that receive messages
//! from several producers must serialize the calls themselves; the borrow
//! checker guarantees that no reader holds a surface across an apply.

pub mod convert;
pub mod stream;

pub use stream::{message_stream, StreamSummary};

use crate::config::RuntimeConfig;
use crate::error::{ApplyError, ApplyResult, ShapeError};
use crate::path;
use crate::surface::{ComponentNode, RenderNode, Surface};
use a2ui_protocol::bindings::Binding;
use a2ui_protocol::constants::{component_types, STANDARD_CATALOG_ID};
use a2ui_protocol::ipc::Event;
use a2ui_protocol::server_messages::{
    BeginRendering, DataModelUpdate, DeleteSurface, ServerAction, ServerToClientMessage,
    SurfaceUpdate,
};
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::mpsc::UnboundedSender;

/// Applies A2UI messages and maintains surface state.
///
/// # Example
///
/// ```
/// use a2ui_core::processor::MessageProcessor;
/// use a2ui_protocol::ServerToClientMessage;
///
/// let mut processor = MessageProcessor::new();
/// let line = r#"{"dataModelUpdate": {"surfaceId": "main", "contents": [{"key": "name", "valueString": "Ada"}]}}"#;
/// let message: ServerToClientMessage = serde_json::from_str(line).unwrap();
/// processor.apply_message(message).unwrap();
///
/// assert_eq!(processor.get_data("main", "name", None), Some(&serde_json::json!("Ada")));
/// ```
#[derive(Debug, Default)]
pub struct MessageProcessor {
    /// Live surfaces, keyed by surface id.
    surfaces: HashMap<String, Surface>,

    config: RuntimeConfig,

    /// Observer channel registered by the owning runtime.
    events_tx: Option<UnboundedSender<Event>>,
}

impl MessageProcessor {
    /// Create a processor with the default configuration and no observer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `config` for catalog fallback and diagnostics.
    pub fn with_config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Send change notifications on `events_tx`.
    pub fn with_events(mut self, events_tx: UnboundedSender<Event>) -> Self {
        self.events_tx = Some(events_tx);
        self
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Apply a single message.
    ///
    /// Exactly one field of the message should be populated. If several
    /// are, the first in the order `beginRendering`, `surfaceUpdate`,
    /// `dataModelUpdate`, `deleteSurface` is applied and the rest ignored.
    /// An empty message is ignored.
    ///
    /// # Errors
    ///
    /// Returns `ApplyError` listing the malformed components or data entries
    /// of the message. Everything well-formed in the same message has already
    /// been applied when the error is returned.
    pub fn apply_message(&mut self, message: ServerToClientMessage) -> ApplyResult<()> {
        let kinds = message.populated_kinds();
        if kinds.len() > 1 {
            tracing::warn!(
                fields = ?kinds,
                applied = %kinds[0],
                "message populates more than one field; applying the first"
            );
        }

        let Some(action) = message.into_action() else {
            tracing::warn!("message populates no known field; ignoring");
            return Ok(());
        };

        let surface_id = action.surface_id().to_string();
        let errors = match action {
            ServerAction::BeginRendering(m) => {
                self.begin_rendering(m);
                Vec::new()
            }
            ServerAction::SurfaceUpdate(m) => self.surface_update(m),
            ServerAction::DataModelUpdate(m) => self.data_model_update(m),
            ServerAction::DeleteSurface(m) => {
                self.delete_surface(m);
                Vec::new()
            }
        };

        if errors.is_empty() {
            Ok(())
        } else {
            for error in &errors {
                tracing::warn!(surface_id = %surface_id, %error, "rejected malformed unit");
            }
            Err(ApplyError { surface_id, errors })
        }
    }

    /// Apply messages in order, collecting the errors of each.
    pub fn apply_messages<I>(&mut self, messages: I) -> Vec<ApplyError>
    where
        I: IntoIterator<Item = ServerToClientMessage>,
    {
        messages
            .into_iter()
            .filter_map(|message| self.apply_message(message).err())
            .collect()
    }

    /// Get a surface by id.
    pub fn get_surface(&self, surface_id: &str) -> Option<&Surface> {
        self.surfaces.get(surface_id)
    }

    /// All live surfaces, in no particular order.
    pub fn surfaces(&self) -> impl Iterator<Item = &Surface> {
        self.surfaces.values()
    }

    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    /// Drop every surface.
    pub fn clear_surfaces(&mut self) {
        let ids: Vec<String> = self.surfaces.keys().cloned().collect();
        self.surfaces.clear();
        for surface_id in ids {
            self.notify(Event::SurfaceDeleted { surface_id });
        }
    }

    /// Resolve a binding path against an optional data context.
    ///
    /// See [`path::resolve_path`].
    pub fn resolve_path(&self, path: &str, context_path: Option<&str>) -> String {
        path::resolve_path(path, context_path)
    }

    /// Read a value from a surface's data model.
    ///
    /// Returns `None` for unknown surfaces and missing paths.
    pub fn get_data(&self, surface_id: &str, path: &str, context_path: Option<&str>) -> Option<&Value> {
        self.get_surface(surface_id)?.get_data(path, context_path)
    }

    /// Write a value into a surface's data model, creating the surface if
    /// needed.
    ///
    /// Intended for local changes made outside the message stream, such as
    /// an input field updating its bound path.
    pub fn set_data(&mut self, surface_id: &str, path: &str, value: Value, context_path: Option<&str>) {
        let resolved = path::resolve_path(path, context_path);
        self.write_data(surface_id, &resolved, value);
        self.notify(Event::SurfaceUpdated {
            surface_id: surface_id.to_string(),
        });
    }

    /// The concrete value of a binding on a surface.
    pub fn resolve_binding(
        &self,
        surface_id: &str,
        binding: &Binding,
        context_path: Option<&str>,
    ) -> Option<Value> {
        self.get_surface(surface_id)?
            .resolve_binding(binding, context_path)
    }

    /// Walk a surface from its root, bounded by the configured depth.
    pub fn render_tree(&self, surface_id: &str) -> Option<RenderNode> {
        self.get_surface(surface_id)?
            .render_tree(self.config.max_tree_depth)
    }

    fn begin_rendering(&mut self, message: BeginRendering) {
        let BeginRendering {
            surface_id,
            root,
            catalog_id,
            styles,
        } = message;
        let fallback_catalog = self.config.catalog_id.clone();
        let surface = self.get_or_create_surface(&surface_id);

        // A new render cycle discards the previous component definitions.
        surface.components.clear();
        surface.root_component_id = Some(root);
        surface.catalog_id = catalog_id.unwrap_or(fallback_catalog);
        surface.styles = styles;
        surface.is_ready_to_render = true;

        tracing::debug!(
            surface_id = %surface_id,
            root = ?surface.root_component_id,
            catalog_id = %surface.catalog_id,
            "begin rendering"
        );
        self.notify(Event::SurfaceUpdated { surface_id });
    }

    fn surface_update(&mut self, message: SurfaceUpdate) -> Vec<ShapeError> {
        let SurfaceUpdate {
            surface_id,
            components,
        } = message;
        let received = components.len();
        let surface = self.get_or_create_surface(&surface_id);
        let mut errors = Vec::new();

        for definition in components {
            match ComponentNode::try_from(definition) {
                Ok(node) => {
                    if surface.catalog_id == STANDARD_CATALOG_ID
                        && !component_types::is_standard(&node.component_type)
                    {
                        tracing::debug!(
                            surface_id = %surface_id,
                            component_id = %node.id,
                            component_type = %node.component_type,
                            "component type is not in the standard catalog"
                        );
                    }
                    surface.components.insert(node.id.clone(), node);
                }
                Err(error) => errors.push(error),
            }
        }

        tracing::debug!(
            surface_id = %surface_id,
            received,
            rejected = errors.len(),
            total = surface.components.len(),
            "surface update"
        );
        self.notify(Event::SurfaceUpdated { surface_id });
        errors
    }

    fn data_model_update(&mut self, message: DataModelUpdate) -> Vec<ShapeError> {
        let DataModelUpdate {
            surface_id,
            path,
            contents,
        } = message;
        let path = path.unwrap_or_else(|| path::ROOT.to_string());

        let mut errors = Vec::new();
        let value = Value::Object(convert::entries_to_map(contents, &mut errors));
        self.write_data(&surface_id, &path, value);

        tracing::debug!(surface_id = %surface_id, path = %path, "data model update");
        self.notify(Event::SurfaceUpdated { surface_id });
        errors
    }

    fn delete_surface(&mut self, message: DeleteSurface) {
        let DeleteSurface { surface_id } = message;
        if self.surfaces.remove(&surface_id).is_some() {
            tracing::debug!(surface_id = %surface_id, "delete surface");
            self.notify(Event::SurfaceDeleted { surface_id });
        } else {
            tracing::debug!(surface_id = %surface_id, "delete of unknown surface");
        }
    }

    fn write_data(&mut self, surface_id: &str, path: &str, value: Value) {
        let report = self.config.report_path_conflicts;
        let surface = self.get_or_create_surface(surface_id);
        let Some(conflict) = surface.data_model.set(path, value) else {
            return;
        };

        tracing::warn!(
            surface_id = %surface_id,
            path = %path,
            segment = %conflict.segment,
            replaced = %conflict.replaced,
            "data model write replaced a non-object value"
        );
        if report {
            self.notify(Event::DataPathConflict {
                surface_id: surface_id.to_string(),
                path: path.to_string(),
                segment: conflict.segment,
            });
        }
    }

    fn get_or_create_surface(&mut self, surface_id: &str) -> &mut Surface {
        let catalog_id = &self.config.catalog_id;
        self.surfaces
            .entry(surface_id.to_string())
            .or_insert_with(|| Surface::new(surface_id, catalog_id.clone()))
    }

    fn notify(&self, event: Event) {
        if let Some(tx) = &self.events_tx {
            // A dropped receiver only means nobody is observing any more.
            let _ = tx.send(event);
        }
    }
}
