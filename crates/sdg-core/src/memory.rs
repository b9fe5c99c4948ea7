//! # Memory
//!
//! The memory store is the shared context agents write step results into.
//! The SDG agent treats it as an opaque collaborator: it only holds the
//! reference and hands it to the base agent.

use crate::error::MemoryError;
use crate::validation::{IdentifierRules, ValidationError};

/// Validated memory key.
///
/// Wraps a `String` that passed [`IdentifierRules::MEMORY_KEY`], so typos and
/// path-like keys are rejected before they reach a backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemoryKey(String);

/// Errors that can occur when creating a `MemoryKey`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidMemoryKey {
    #[error("Memory key cannot be empty")]
    Empty,
    #[error("Memory key too long: {0} characters (max 128)")]
    TooLong(usize),
    #[error("Memory key contains invalid characters: '{0}'")]
    InvalidChars(String),
}

impl MemoryKey {
    /// Maximum allowed length for memory keys.
    pub const MAX_LENGTH: usize = 128;

    /// Create a new validated memory key.
    ///
    /// ```rust
    /// use sdg_core::MemoryKey;
    ///
    /// let key = MemoryKey::new("step:plan-1:step-1").unwrap();
    /// assert_eq!(key.as_str(), "step:plan-1:step-1");
    /// assert!(MemoryKey::new("has spaces").is_err());
    /// ```
    pub fn new(key: &str) -> Result<Self, InvalidMemoryKey> {
        let validated = IdentifierRules::MEMORY_KEY
            .validate(key)
            .map_err(|e| match e {
                ValidationError::Empty => InvalidMemoryKey::Empty,
                ValidationError::TooLong { length, .. } => InvalidMemoryKey::TooLong(length),
                ValidationError::PathTraversal => InvalidMemoryKey::InvalidChars(key.to_string()),
                ValidationError::InvalidChar { input, .. } => InvalidMemoryKey::InvalidChars(input),
            })?;

        Ok(MemoryKey(validated))
    }

    /// Get the memory key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for MemoryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for MemoryKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for MemoryKey {
    type Error = InvalidMemoryKey;

    fn try_from(key: &str) -> Result<Self, Self::Error> {
        MemoryKey::new(key)
    }
}

/// A key-value update for storing data in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryUpdate {
    pub key: MemoryKey,
    pub value: String,
}

impl MemoryUpdate {
    /// Create a new update, validating the key.
    pub fn new(key: &str, value: &str) -> Result<Self, InvalidMemoryKey> {
        Ok(Self {
            key: MemoryKey::new(key)?,
            value: value.to_string(),
        })
    }

    /// Create an update from an already validated key.
    pub fn from_validated(key: MemoryKey, value: String) -> Self {
        Self { key, value }
    }
}

/// Read access to memory.
pub trait MemoryReader: Send + Sync {
    /// Load a value by key; `Ok(None)` when the key is absent.
    fn load(&self, key: &MemoryKey) -> Result<Option<String>, MemoryError>;

    /// Load several values, in key order.
    fn load_many(&self, keys: &[MemoryKey]) -> Result<Vec<Option<String>>, MemoryError> {
        keys.iter().map(|key| self.load(key)).collect()
    }
}

/// Write access to memory.
///
/// Writers take `&self`: the store is shared between the agents of a
/// session, so backends synchronize internally.
pub trait MemoryWriter: Send + Sync {
    /// Store a key-value pair, replacing any previous value.
    fn store(&self, update: MemoryUpdate) -> Result<(), MemoryError>;

    /// Store several pairs.
    fn store_many(&self, updates: Vec<MemoryUpdate>) -> Result<(), MemoryError> {
        for update in updates {
            self.store(update)?;
        }
        Ok(())
    }
}

/// A full memory store.
pub trait Memory: MemoryReader + MemoryWriter {}

impl<T: MemoryReader + MemoryWriter> Memory for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_keys() {
        assert_eq!(MemoryKey::new(""), Err(InvalidMemoryKey::Empty));
        assert_eq!(
            MemoryKey::new(&"a".repeat(200)),
            Err(InvalidMemoryKey::TooLong(200))
        );
        assert!(matches!(
            MemoryKey::new("a/b"),
            Err(InvalidMemoryKey::InvalidChars(_))
        ));
    }

    #[test]
    fn update_validates_key() {
        let update = MemoryUpdate::new("session.context", "v").unwrap();
        assert_eq!(update.key.as_str(), "session.context");
        assert!(MemoryUpdate::new("bad key", "v").is_err());
    }
}
