//! In-memory entity store.
//!
//! A keyed collection that stands in for a persistence repository in tests.
//! Two backing shapes are supported:
//!
//! - **list-backed**: a `Vec<T>` searched by an integer id. Duplicate ids are
//!   allowed; lookups return the first match.
//! - **map-backed**: a `HashMap<K, T>` keyed by a caller-supplied extractor.
//!   Keys are unique.
//!
//! Nothing here performs I/O, so the asynchronous operations complete on
//! their first poll.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use common::{
    AsyncFindKeys, CancellationToken, StoreConfig, StoreError, StoreResult, UpdatePolicy,
};
use domain::{single_key, EntityEntry, Identifiable, KeyType, KeyValue};

use crate::repository::{EntityFilter, EntityOrder, Repository};

type KeyFn<K, T> = Arc<dyn Fn(&T) -> K + Send + Sync>;

enum Backing<K, T> {
    List(Vec<T>),
    Map(HashMap<K, T>),
}

impl<K, T> Backing<K, T> {
    fn kind(&self) -> &'static str {
        match self {
            Backing::List(_) => "list",
            Backing::Map(_) => "map",
        }
    }

    fn len(&self) -> usize {
        match self {
            Backing::List(entities) => entities.len(),
            Backing::Map(entries) => entries.len(),
        }
    }
}

/// List-backed store keyed by integer id
pub type ListStore<T> = InMemoryEntityStore<i64, T>;

/// Map-backed store keyed by `K`
pub type MapStore<K, T> = InMemoryEntityStore<K, T>;

/// In-memory repository double.
///
/// Owned by a single test. The internal lock exists only so the store can be
/// shared as `Arc<dyn Repository<T>>`; it is never held across an await.
///
/// The key function is called before the lock is taken, except while
/// scanning a list-backed store in `find`, `find_by_key` and `update`.
pub struct InMemoryEntityStore<K, T> {
    backing: Mutex<Backing<K, T>>,
    key_of: KeyFn<K, T>,
    config: StoreConfig,
}

impl<T> InMemoryEntityStore<i64, T> {
    /// Create a list-backed store seeded with `entities`.
    ///
    /// `id_of` plays the role of the entity's `Id` property. Lookups call it
    /// while the store is locked, so it must not call back into the store.
    pub fn list_backed<F>(entities: Vec<T>, id_of: F) -> Self
    where
        F: Fn(&T) -> i64 + Send + Sync + 'static,
    {
        Self {
            backing: Mutex::new(Backing::List(entities)),
            key_of: Arc::new(id_of),
            config: StoreConfig::default(),
        }
    }
}

impl<T: Identifiable + 'static> InMemoryEntityStore<i64, T> {
    /// Create a list-backed store using `Identifiable::id`
    pub fn from_identifiable(entities: Vec<T>) -> Self {
        Self::list_backed(entities, |e: &T| e.id())
    }
}

impl<K, T> InMemoryEntityStore<K, T>
where
    K: KeyType + Eq + Hash + Clone,
{
    /// Create a map-backed store from an existing key-to-entity mapping.
    ///
    /// The mapping is trusted as given: removal and update locate entities
    /// through `key_of`, so seeded keys should agree with it. `key_of` is
    /// never called while the store is locked.
    pub fn map_backed<F>(entries: HashMap<K, T>, key_of: F) -> Self
    where
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        Self {
            backing: Mutex::new(Backing::Map(entries)),
            key_of: Arc::new(key_of),
            config: StoreConfig::default(),
        }
    }

    /// Create a map-backed store keyed by `key_of`.
    ///
    /// Fails if two seed entities share a key.
    pub fn map_backed_from<I, F>(entities: I, key_of: F) -> StoreResult<Self>
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        let mut entries = HashMap::new();
        for entity in entities {
            let key = key_of(&entity);
            if entries.contains_key(&key) {
                return Err(StoreError::duplicate_key(key.to_key_value()));
            }
            entries.insert(key, entity);
        }
        Ok(Self::map_backed(entries, key_of))
    }
}

impl<K, T> InMemoryEntityStore<K, T> {
    /// Replace the store configuration
    pub fn with_config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Active configuration
    pub fn config(&self) -> StoreConfig {
        self.config
    }

    /// Backing shape, `"list"` or `"map"`
    pub fn kind(&self) -> &'static str {
        self.backing.lock().kind()
    }

    /// Number of stored entities
    pub fn len(&self) -> usize {
        self.backing.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, T> InMemoryEntityStore<K, T>
where
    K: KeyType + Eq + Hash + Clone,
    T: Clone + PartialEq,
{
    /// Snapshot of the stored entities.
    ///
    /// List-backed stores keep insertion order; map order is unspecified.
    pub fn entities(&self) -> Vec<T> {
        match &*self.backing.lock() {
            Backing::List(entities) => entities.clone(),
            Backing::Map(entries) => entries.values().cloned().collect(),
        }
    }

    /// Typed lookup, checked at compile time
    pub fn find_by_key(&self, key: &K) -> Option<T> {
        match &*self.backing.lock() {
            Backing::List(entities) => entities
                .iter()
                .find(|e| (self.key_of)(*e) == *key)
                .cloned(),
            Backing::Map(entries) => entries.get(key).cloned(),
        }
    }

    /// Whether an entity with `key` is stored
    pub fn contains_key(&self, key: &K) -> bool {
        self.find_by_key(key).is_some()
    }
}

impl<K, T> InMemoryEntityStore<K, T>
where
    K: KeyType + Eq + Hash + Clone + Send + Sync + 'static,
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// `add_range` over any iterator of entities
    pub fn add_range_iter<I>(&self, entities: I) -> StoreResult<()>
    where
        I: IntoIterator<Item = T>,
    {
        self.add_range(entities.into_iter().collect())
    }
}

impl<K, T> fmt::Debug for InMemoryEntityStore<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let backing = self.backing.lock();
        f.debug_struct("InMemoryEntityStore")
            .field("kind", &backing.kind())
            .field("len", &backing.len())
            .field("config", &self.config)
            .finish()
    }
}

#[async_trait]
impl<K, T> Repository<T> for InMemoryEntityStore<K, T>
where
    K: KeyType + Eq + Hash + Clone + Send + Sync + 'static,
    T: Clone + PartialEq + Send + Sync + 'static,
{
    fn find(&self, keys: &[KeyValue]) -> StoreResult<Option<T>> {
        let raw = single_key(keys)?;
        let key = K::from_key_value(raw)?;
        let backing = self.backing.lock();

        let found = match &*backing {
            Backing::List(entities) => entities
                .iter()
                .find(|e| (self.key_of)(*e) == key)
                .cloned(),
            Backing::Map(entries) => entries.get(&key).cloned(),
        };

        tracing::debug!(
            "find {} on {} store: {}",
            raw,
            backing.kind(),
            if found.is_some() { "hit" } else { "miss" }
        );
        Ok(found)
    }

    async fn find_async(&self, keys: &[KeyValue]) -> StoreResult<Option<T>> {
        match self.config.async_find_keys {
            AsyncFindKeys::Forward => self.find(keys),
            AsyncFindKeys::Discard => {
                tracing::debug!("find_async discarding {} key(s)", keys.len());
                self.find(&[])
            }
        }
    }

    fn add(&self, entity: T) -> StoreResult<EntityEntry<T>> {
        let key = (self.key_of)(&entity);
        let mut backing = self.backing.lock();

        match &mut *backing {
            Backing::List(entities) => entities.push(entity.clone()),
            Backing::Map(entries) => {
                if entries.contains_key(&key) {
                    tracing::warn!("add rejected: key {} already exists", key.to_key_value());
                    return Err(StoreError::duplicate_key(key.to_key_value()));
                }
                entries.insert(key, entity.clone());
            }
        }

        tracing::debug!("added entity to {} store, size {}", backing.kind(), backing.len());
        Ok(EntityEntry::new(entity))
    }

    async fn add_async(&self, entity: T) -> StoreResult<EntityEntry<T>> {
        self.add(entity)
    }

    fn add_range(&self, batch: Vec<T>) -> StoreResult<()> {
        let count = batch.len();
        let keyed: Vec<(K, T)> = batch
            .into_iter()
            .map(|e| ((self.key_of)(&e), e))
            .collect();
        let mut backing = self.backing.lock();

        match &mut *backing {
            Backing::List(entities) => entities.extend(keyed.into_iter().map(|(_, e)| e)),
            Backing::Map(entries) => {
                // Validate the whole batch before touching the map.
                let mut seen = HashSet::with_capacity(keyed.len());
                for (key, _) in &keyed {
                    if entries.contains_key(key) || !seen.insert(key) {
                        tracing::warn!(
                            "add_range rejected: key {} collides, nothing inserted",
                            key.to_key_value()
                        );
                        return Err(StoreError::duplicate_key(key.to_key_value()));
                    }
                }

                entries.extend(keyed);
            }
        }

        tracing::debug!(
            "added {} entities to {} store, size {}",
            count,
            backing.kind(),
            backing.len()
        );
        Ok(())
    }

    async fn add_range_async(&self, entities: Vec<T>) -> StoreResult<()> {
        self.add_range(entities)
    }

    fn remove(&self, entity: T) -> StoreResult<EntityEntry<T>> {
        let key = (self.key_of)(&entity);
        let mut backing = self.backing.lock();

        let removed = match &mut *backing {
            Backing::List(entities) => match entities.iter().position(|e| *e == entity) {
                Some(index) => {
                    entities.remove(index);
                    true
                }
                None => false,
            },
            Backing::Map(entries) => entries.remove(&key).is_some(),
        };

        if removed {
            tracing::debug!("removed entity from {} store, size {}", backing.kind(), backing.len());
        } else {
            tracing::debug!("remove on {} store: entity not present", backing.kind());
        }
        Ok(EntityEntry::new(entity))
    }

    fn update(&self, entity: T) -> StoreResult<EntityEntry<T>> {
        let key = (self.key_of)(&entity);
        let mut backing = self.backing.lock();

        match &mut *backing {
            Backing::List(entities) => {
                let id = key.to_key_value();
                let Some(index) = entities.iter().position(|e| (self.key_of)(e) == key) else {
                    tracing::warn!("update rejected: no entity with id {}", id);
                    return Err(StoreError::NotFound);
                };
                entities[index] = entity.clone();

                if self.config.update_policy == UpdatePolicy::AlwaysFail {
                    tracing::warn!("update replaced id {} but reports not found", id);
                    return Err(StoreError::NotFound);
                }
                tracing::debug!("updated id {} in list store", id);
            }
            Backing::Map(entries) => {
                tracing::debug!("upserting key {} in map store", key.to_key_value());
                entries.insert(key, entity.clone());
            }
        }

        Ok(EntityEntry::new(entity))
    }

    fn get(
        &self,
        filter: Option<EntityFilter<T>>,
        order_by: Option<EntityOrder<T>>,
    ) -> StoreResult<Vec<T>> {
        let mut result = self.entities();
        if let Some(filter) = filter {
            result.retain(|e| filter(e));
        }
        if let Some(order_by) = order_by {
            result.sort_by(|a, b| order_by(a, b));
        }
        Ok(result)
    }

    async fn get_async(
        &self,
        filter: Option<EntityFilter<T>>,
        order_by: Option<EntityOrder<T>>,
    ) -> StoreResult<Vec<T>> {
        self.get(filter, order_by)
    }

    async fn save_changes_async(&self) -> StoreResult<usize> {
        Ok(self.len())
    }

    async fn save_changes_cancellable_async(
        &self,
        cancel: &CancellationToken,
    ) -> StoreResult<usize> {
        if cancel.is_cancelled() {
            tracing::debug!("save cancelled before start");
            return Err(StoreError::Cancelled);
        }
        Ok(self.len())
    }
}
