//! Common test utilities and helpers for integration tests.
//!
//! This module provides:
//! - Feed fixtures (JSON Lines message sequences, config directories)
//! - Event helpers

pub mod events;
pub mod fixtures;

#[allow(unused_imports)]
pub use events::*;
pub use fixtures::*;
