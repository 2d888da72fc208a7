//! Store behaviour configuration.
//!
//! Two behaviours of the legacy repository double are reproducible on
//! request. The defaults give the corrected semantics.

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{ENV_ASYNC_FIND_KEYS, ENV_UPDATE_POLICY};

/// How `find_async` routes its key arguments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AsyncFindKeys {
    /// Look up with the supplied keys, same as `find`
    #[default]
    Forward,
    /// Ignore the supplied keys and look up with an empty key set.
    /// Every call fails with an invalid-argument error.
    Discard,
}

impl FromStr for AsyncFindKeys {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forward" => Ok(AsyncFindKeys::Forward),
            "discard" => Ok(AsyncFindKeys::Discard),
            other => Err(format!("unknown async find mode: {}", other)),
        }
    }
}

/// How a list-backed `update` reports its outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpdatePolicy {
    /// Fail with not-found only when no stored entity has the same id
    #[default]
    Strict,
    /// Replace when found, then fail with not-found regardless
    AlwaysFail,
}

impl FromStr for UpdatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(UpdatePolicy::Strict),
            "always-fail" | "always_fail" => Ok(UpdatePolicy::AlwaysFail),
            other => Err(format!("unknown update policy: {}", other)),
        }
    }
}

/// Store configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub async_find_keys: AsyncFindKeys,
    #[serde(default)]
    pub update_policy: UpdatePolicy,
}

impl StoreConfig {
    /// Load configuration from environment variables (and `.env` if present).
    ///
    /// Unknown values are logged and replaced by the default.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            async_find_keys: parse_or_default(ENV_ASYNC_FIND_KEYS, lookup(ENV_ASYNC_FIND_KEYS)),
            update_policy: parse_or_default(ENV_UPDATE_POLICY, lookup(ENV_UPDATE_POLICY)),
        }
    }

    /// Configuration reproducing the legacy repository double exactly
    pub fn legacy() -> Self {
        Self {
            async_find_keys: AsyncFindKeys::Discard,
            update_policy: UpdatePolicy::AlwaysFail,
        }
    }

    pub fn with_async_find_keys(mut self, mode: AsyncFindKeys) -> Self {
        self.async_find_keys = mode;
        self
    }

    pub fn with_update_policy(mut self, policy: UpdatePolicy) -> Self {
        self.update_policy = policy;
        self
    }
}

fn parse_or_default<T>(name: &str, raw: Option<String>) -> T
where
    T: FromStr<Err = String> + Default,
{
    match raw {
        None => T::default(),
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            tracing::warn!("{} ignored: {}", name, e);
            T::default()
        }),
    }
}
