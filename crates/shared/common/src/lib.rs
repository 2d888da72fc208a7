//! Common utilities shared across the workspace.
//!
//! This crate provides:
//! - Unified error handling for store operations
//! - Store configuration loaded from the environment
//! - Tracing setup and a cancellation token

pub mod cancel;
pub mod config;
pub mod constants;
pub mod error;
pub mod telemetry;

pub use cancel::CancellationToken;
pub use config::{AsyncFindKeys, StoreConfig, UpdatePolicy};
pub use error::{OptionExt, StoreError, StoreResult};
pub use telemetry::init_tracing;
