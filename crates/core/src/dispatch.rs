//! Outbound client-to-server messages.
//!
//! When the user interacts with a component that declares an `action`, the
//! runtime builds a `userAction` message: the action name, where it came
//! from, and the action's context with every binding resolved against the
//! surface's current data. The message is handed to an outbound channel; the
//! transport that drains it is not part of this crate.

use crate::processor::MessageProcessor;
use a2ui_protocol::bindings::Binding;
use a2ui_protocol::client_messages::{ClientToServerMessage, UserAction};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("unknown surface '{0}'")]
    UnknownSurface(String),

    #[error("component '{component_id}' not found on surface '{surface_id}'")]
    UnknownComponent {
        surface_id: String,
        component_id: String,
    },

    #[error("component '{0}' has no action")]
    NoAction(String),

    #[error("outbound channel closed")]
    ChannelClosed,
}

pub type DispatchResult<T> = Result<T, DispatchError>;

/// Build the `userAction` for a component, stamped with the current time.
///
/// `context_path` is the data context the component was rendered in (for
/// template children, the path of their collection element).
pub fn build_user_action(
    processor: &MessageProcessor,
    surface_id: &str,
    component_id: &str,
    context_path: Option<&str>,
) -> DispatchResult<UserAction> {
    build_user_action_at(processor, surface_id, component_id, context_path, Utc::now())
}

/// Like [`build_user_action`], with an explicit timestamp.
pub fn build_user_action_at(
    processor: &MessageProcessor,
    surface_id: &str,
    component_id: &str,
    context_path: Option<&str>,
    timestamp: DateTime<Utc>,
) -> DispatchResult<UserAction> {
    let surface = processor
        .get_surface(surface_id)
        .ok_or_else(|| DispatchError::UnknownSurface(surface_id.to_string()))?;
    let node = surface
        .component(component_id)
        .ok_or_else(|| DispatchError::UnknownComponent {
            surface_id: surface_id.to_string(),
            component_id: component_id.to_string(),
        })?;
    let action = node
        .action()
        .ok_or_else(|| DispatchError::NoAction(component_id.to_string()))?;

    let mut context = Map::new();
    for entry in action.context {
        let binding = match Binding::try_from(entry.value) {
            Ok(binding) => binding,
            Err(_) => {
                tracing::warn!(component_id, key = %entry.key, "action context entry has no value");
                continue;
            }
        };
        // Unresolved paths are sent as null so the agent still sees the key.
        let value = surface
            .resolve_binding(&binding, context_path)
            .unwrap_or(Value::Null);
        context.insert(entry.key, value);
    }

    Ok(UserAction {
        name: action.name,
        surface_id: surface_id.to_string(),
        source_component_id: component_id.to_string(),
        timestamp,
        context,
    })
}

/// Sends client-to-server messages on an outbound channel.
#[derive(Debug, Clone)]
pub struct ActionDispatcher {
    outbound: UnboundedSender<ClientToServerMessage>,
}

impl ActionDispatcher {
    pub fn new(outbound: UnboundedSender<ClientToServerMessage>) -> Self {
        Self { outbound }
    }

    /// Build and send the `userAction` for a component.
    ///
    /// Returns the action that was sent.
    pub fn dispatch_user_action(
        &self,
        processor: &MessageProcessor,
        surface_id: &str,
        component_id: &str,
        context_path: Option<&str>,
    ) -> DispatchResult<UserAction> {
        let action = build_user_action(processor, surface_id, component_id, context_path)?;
        tracing::debug!(
            surface_id,
            component_id,
            action = %action.name,
            "dispatching user action"
        );
        self.send(ClientToServerMessage::user_action(action.clone()))?;
        Ok(action)
    }

    /// Report a client-side error to the agent.
    pub fn dispatch_error(&self, error: Map<String, Value>) -> DispatchResult<()> {
        tracing::debug!("dispatching client error");
        self.send(ClientToServerMessage::error(error))
    }

    fn send(&self, message: ClientToServerMessage) -> DispatchResult<()> {
        self.outbound
            .send(message)
            .map_err(|_| DispatchError::ChannelClosed)
    }
}
