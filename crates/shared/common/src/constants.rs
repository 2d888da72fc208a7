//! Store-wide constants
//!
//! Centralized location for environment variable names and defaults.

// =============================================================================
// Configuration keys
// =============================================================================

/// Selects how `find_async` treats its key arguments (`forward` | `discard`)
pub const ENV_ASYNC_FIND_KEYS: &str = "ENTITY_STORE_ASYNC_FIND_KEYS";

/// Selects how list-backed `update` reports its outcome (`strict` | `always-fail`)
pub const ENV_UPDATE_POLICY: &str = "ENTITY_STORE_UPDATE_POLICY";

// =============================================================================
// Logging
// =============================================================================

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Log filter used in verbose mode
pub const VERBOSE_LOG_FILTER: &str = "debug";
