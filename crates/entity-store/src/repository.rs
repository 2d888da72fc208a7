//! Repository capability trait.
//!
//! Application code depends on this trait instead of a concrete persistence
//! layer. Tests hand it an `InMemoryEntityStore` or a scripted
//! `MockRepository`.

use std::cmp::Ordering;

use async_trait::async_trait;
use common::{CancellationToken, StoreResult};
use domain::{EntityEntry, KeyValue};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Predicate applied by `get`
pub type EntityFilter<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Comparator applied by `get`
pub type EntityOrder<T> = Box<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Entity-level repository operations in synchronous and asynchronous form.
///
/// Mutating operations take `&self` so an implementation can be shared as
/// `Arc<dyn Repository<T>>`.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait Repository<T>: Send + Sync
where
    T: Clone + Send + Sync + 'static,
{
    /// Find an entity by a single key.
    ///
    /// Fails on zero or several keys, or on a key of the wrong type.
    /// A well-typed key with no match yields `Ok(None)`.
    fn find(&self, keys: &[KeyValue]) -> StoreResult<Option<T>>;

    /// Asynchronous `find`
    async fn find_async(&self, keys: &[KeyValue]) -> StoreResult<Option<T>>;

    /// Insert an entity
    fn add(&self, entity: T) -> StoreResult<EntityEntry<T>>;

    /// Asynchronous `add`
    async fn add_async(&self, entity: T) -> StoreResult<EntityEntry<T>>;

    /// Insert every entity, or none of them if any insert would fail
    fn add_range(&self, entities: Vec<T>) -> StoreResult<()>;

    /// Asynchronous `add_range`
    async fn add_range_async(&self, entities: Vec<T>) -> StoreResult<()>;

    /// Remove an entity. Removing an absent entity is a no-op.
    fn remove(&self, entity: T) -> StoreResult<EntityEntry<T>>;

    /// Replace the stored entity with the same identity
    fn update(&self, entity: T) -> StoreResult<EntityEntry<T>>;

    /// List entities, optionally filtered and ordered
    fn get(
        &self,
        filter: Option<EntityFilter<T>>,
        order_by: Option<EntityOrder<T>>,
    ) -> StoreResult<Vec<T>>;

    /// Asynchronous `get`
    async fn get_async(
        &self,
        filter: Option<EntityFilter<T>>,
        order_by: Option<EntityOrder<T>>,
    ) -> StoreResult<Vec<T>>;

    /// Number of entities currently held, reported as rows affected
    async fn save_changes_async(&self) -> StoreResult<usize>;

    /// `save_changes_async` that fails if `cancel` is already signalled
    async fn save_changes_cancellable_async(&self, cancel: &CancellationToken)
        -> StoreResult<usize>;
}
