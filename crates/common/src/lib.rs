//! framepress Common Utilities
//!
//! Shared infrastructure for all framepress crates:
//! - Error types and result aliases
//! - Opaque identifier generation
//! - Tracing/logging initialization
//! - Configuration loading

pub mod config;
pub mod error;
pub mod ids;
pub mod logging;

pub use config::*;
pub use error::*;
pub use ids::*;
