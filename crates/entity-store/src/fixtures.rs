//! JSON fixtures for seeding stores.
//!
//! Lets a test keep its seed data next to the test as a JSON literal or file
//! instead of building every entity by hand.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use common::StoreResult;

/// Parse a JSON array into a list-backed seed
pub fn load_list<T: DeserializeOwned>(json: &str) -> StoreResult<Vec<T>> {
    let entities: Vec<T> = serde_json::from_str(json)?;
    tracing::debug!("loaded {} fixture entities", entities.len());
    Ok(entities)
}

/// Parse a JSON object into a map-backed seed keyed by the object's field names
pub fn load_map<T: DeserializeOwned>(json: &str) -> StoreResult<HashMap<String, T>> {
    let entries: HashMap<String, T> = serde_json::from_str(json)?;
    tracing::debug!("loaded {} fixture entries", entries.len());
    Ok(entries)
}
