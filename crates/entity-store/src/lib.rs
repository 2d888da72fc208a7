//! In-memory entity store for testing code written against a repository.
//!
//! Application code depends on [`Repository`]; tests hand it an
//! [`InMemoryEntityStore`] seeded with entities instead of a database-backed
//! implementation.
//!
//! # Example
//!
//! ```
//! use entity_store::{KeyValue, ListStore, Repository};
//!
//! #[derive(Clone, PartialEq)]
//! struct Task { id: i64, title: String }
//!
//! let store = ListStore::list_backed(
//!     vec![Task { id: 1, title: "write".into() }],
//!     |t: &Task| t.id,
//! );
//!
//! store.add(Task { id: 2, title: "review".into() }).unwrap();
//! let found = store.find(&[KeyValue::from(2)]).unwrap();
//! assert_eq!(found.map(|t| t.title), Some("review".to_string()));
//! ```

pub mod fixtures;
pub mod repository;
pub mod store;

pub use repository::{EntityFilter, EntityOrder, Repository};
pub use store::{InMemoryEntityStore, ListStore, MapStore};

// Re-export the types that appear in the trait signatures
pub use common::{CancellationToken, StoreConfig, StoreError, StoreResult};
pub use domain::{EntityEntry, Identifiable, KeyType, KeyValue};

// Export mock for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use repository::MockRepository;
