//! # a2ui-protocol
//!
//! Wire-level definitions for the A2UI server-driven UI protocol.
//!
//! A remote agent describes a user interface as a stream of JSON objects,
//! one per line. This crate defines the shape of those objects and of the
//! replies a client sends back:
//! - Server-to-client messages (`beginRendering`, `surfaceUpdate`,
//!   `dataModelUpdate`, `deleteSurface`)
//! - Client-to-server messages (`userAction`, `error`)
//! - Component property shapes (bound values, children, actions)
//! - Runtime notifications emitted by the local message processor
//!
//! ## Modules
//!
//! - [`bindings`]: Bound values, children specifications and actions
//! - [`client_messages`]: Messages sent from the client to the agent
//! - [`constants`]: Standard catalog id and component type names
//! - [`ipc`]: Events emitted by the runtime to its observers
//! - [`server_messages`]: Messages sent from the agent to the client
//!
//! ## Design Principles
//!
//! - Minimal dependencies: Only serde, ts-rs and chrono
//! - TypeScript generation: Wire types derive `TS` for client compatibility
//! - Independent compilation: No dependencies on other a2ui crates

pub mod bindings;
pub mod client_messages;
pub mod constants;
pub mod ipc;
pub mod server_messages;

// Re-export all public types for convenience
pub use bindings::*;
pub use client_messages::*;
pub use constants::*;
pub use ipc::*;
pub use server_messages::*;
