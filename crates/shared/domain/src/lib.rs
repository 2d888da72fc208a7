//! Domain layer - Entity keys, identity and entry handles.
//!
//! This crate contains pure types with no storage or runtime dependencies.
//! They are shared by the store implementation and by code under test.

pub mod entry;
pub mod error;
pub mod key;

pub use entry::EntityEntry;
pub use error::{DomainError, DomainResult};
pub use key::{single_key, Identifiable, KeyType, KeyValue};
