//! # a2ui-core
//!
//! Client-side runtime for the A2UI server-driven UI protocol.
//!
//! This crate provides:
//! - The message processor that applies server messages to surfaces
//! - Per-surface component registries and hierarchical data models
//! - Path resolution, binding evaluation and template expansion
//! - JSON Lines ingestion and outbound user actions
//! - Configuration loading from the `.a2ui/` directory
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading and management
//! - [`data_model`]: Path-addressed per-surface data store
//! - [`dispatch`]: Outbound `userAction` and `error` messages
//! - [`error`]: Apply and stream error types
//! - [`path`]: Binding path resolution
//! - [`processor`]: The message processor and JSON Lines ingestion
//! - [`surface`]: Surfaces, component nodes and the render tree walker

pub mod config;
pub mod data_model;
pub mod dispatch;
pub mod error;
pub mod path;
pub mod processor;
pub mod surface;

pub use processor::{MessageProcessor, StreamSummary};
pub use surface::Surface;
