//! Configuration loading and management.
//!
//! This module provides functionality to load and validate the runtime
//! configuration from the `.a2ui/` directory.

pub mod error;
pub mod loader;
pub mod models;

pub use error::{ConfigError, ConfigResult};
pub use loader::load_config;
pub use models::RuntimeConfig;
