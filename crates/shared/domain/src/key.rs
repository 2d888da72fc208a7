//! Entity keys and identity.
//!
//! `KeyValue` is the loosely typed key argument accepted by variadic lookups.
//! `KeyType` narrows it to the concrete key type a store was declared with.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};

/// A single key argument.
///
/// Deserializes untagged: integers become `Int` (or `UInt` above `i64::MAX`),
/// strings that parse as a UUID become `Uuid`, any other string becomes
/// `Text`. A UUID-shaped string therefore never arrives as `Text` and is
/// rejected by `String` keys. Deserialize such keys into the store's concrete
/// key type instead; `fixtures::load_map` already does.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyValue {
    Int(i64),
    /// Integer above `i64::MAX`. `From<u64>` uses `Int` whenever the value fits.
    UInt(u64),
    Uuid(Uuid),
    Text(String),
}

impl KeyValue {
    /// Name of the carried type, for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            KeyValue::Int(_) | KeyValue::UInt(_) => "integer",
            KeyValue::Uuid(_) => "uuid",
            KeyValue::Text(_) => "string",
        }
    }

    /// Integer payload, if this is an integer key
    pub fn as_int(&self) -> Option<i64> {
        match self {
            KeyValue::Int(v) => Some(*v),
            KeyValue::UInt(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyValue::Int(v) => write!(f, "{}", v),
            KeyValue::UInt(v) => write!(f, "{}", v),
            KeyValue::Uuid(v) => write!(f, "{}", v),
            KeyValue::Text(v) => write!(f, "{:?}", v),
        }
    }
}

impl From<i64> for KeyValue {
    fn from(v: i64) -> Self {
        KeyValue::Int(v)
    }
}

impl From<i32> for KeyValue {
    fn from(v: i32) -> Self {
        KeyValue::Int(i64::from(v))
    }
}

impl From<u32> for KeyValue {
    fn from(v: u32) -> Self {
        KeyValue::Int(i64::from(v))
    }
}

impl From<u64> for KeyValue {
    fn from(v: u64) -> Self {
        i64::try_from(v).map_or(KeyValue::UInt(v), KeyValue::Int)
    }
}

impl From<Uuid> for KeyValue {
    fn from(v: Uuid) -> Self {
        KeyValue::Uuid(v)
    }
}

impl From<&str> for KeyValue {
    fn from(v: &str) -> Self {
        KeyValue::Text(v.to_string())
    }
}

impl From<String> for KeyValue {
    fn from(v: String) -> Self {
        KeyValue::Text(v)
    }
}

/// Concrete key types a map-backed store can be declared with.
pub trait KeyType: Sized {
    /// Human readable type name used in error messages
    const NAME: &'static str;

    /// Narrow a key argument to this type.
    fn from_key_value(value: &KeyValue) -> DomainResult<Self>;

    /// Widen this key back into a key argument.
    fn to_key_value(&self) -> KeyValue;
}

fn mismatch<K: KeyType>(value: &KeyValue) -> DomainError {
    DomainError::invalid_key(format!(
        "key must be {}, got {} {}",
        K::NAME,
        value.kind(),
        value
    ))
}

macro_rules! int_key {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl KeyType for $ty {
                const NAME: &'static str = $name;

                fn from_key_value(value: &KeyValue) -> DomainResult<Self> {
                    let narrowed = match value {
                        KeyValue::Int(v) => <$ty>::try_from(*v).ok(),
                        KeyValue::UInt(v) => <$ty>::try_from(*v).ok(),
                        other => return Err(mismatch::<Self>(other)),
                    };
                    narrowed.ok_or_else(|| {
                        DomainError::invalid_key(format!("key {} out of range for {}", value, $name))
                    })
                }

                fn to_key_value(&self) -> KeyValue {
                    KeyValue::from(*self)
                }
            }
        )*
    };
}

int_key!(i64 => "i64", i32 => "i32", u32 => "u32", u64 => "u64");

impl KeyType for String {
    const NAME: &'static str = "String";

    fn from_key_value(value: &KeyValue) -> DomainResult<Self> {
        match value {
            KeyValue::Text(s) => Ok(s.clone()),
            other => Err(mismatch::<Self>(other)),
        }
    }

    fn to_key_value(&self) -> KeyValue {
        KeyValue::Text(self.clone())
    }
}

impl KeyType for Uuid {
    const NAME: &'static str = "Uuid";

    fn from_key_value(value: &KeyValue) -> DomainResult<Self> {
        match value {
            KeyValue::Uuid(id) => Ok(*id),
            other => Err(mismatch::<Self>(other)),
        }
    }

    fn to_key_value(&self) -> KeyValue {
        KeyValue::Uuid(*self)
    }
}

/// Entities that carry an integer `id`.
///
/// List-backed stores use this as their default key extractor.
pub trait Identifiable {
    fn id(&self) -> i64;
}

/// Extract the only key from a variadic key argument list.
///
/// Composite keys are not supported, and an empty list has nothing to look up.
pub fn single_key(keys: &[KeyValue]) -> DomainResult<&KeyValue> {
    match keys {
        [key] => Ok(key),
        _ => Err(DomainError::KeyArity(keys.len())),
    }
}
