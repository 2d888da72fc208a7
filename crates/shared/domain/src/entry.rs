//! Entry handle returned by mutating store operations.

use serde::Serialize;

/// Handle wrapping the entity affected by an add, remove or update.
///
/// Unlike an ORM change-tracking entry it keeps no original values and no
/// state; it only gives mutating operations the same result shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityEntry<T> {
    entity: T,
}

impl<T> EntityEntry<T> {
    /// Wrap an entity
    pub fn new(entity: T) -> Self {
        Self { entity }
    }

    /// Borrow the wrapped entity
    pub fn entity(&self) -> &T {
        &self.entity
    }

    /// Unwrap into the entity
    pub fn into_entity(self) -> T {
        self.entity
    }
}

impl<T> From<T> for EntityEntry<T> {
    fn from(entity: T) -> Self {
        Self::new(entity)
    }
}
