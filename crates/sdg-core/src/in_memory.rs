use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::MemoryError;
use crate::memory::{MemoryKey, MemoryReader, MemoryUpdate, MemoryWriter};

/// Transient memory backed by a `HashMap` behind an `RwLock`.
///
/// Clones share the same storage, which lets several agents of one session
/// see each other's step results.
///
/// ```rust
/// use sdg_core::{InMemoryMemory, MemoryKey, MemoryReader, MemoryUpdate, MemoryWriter};
///
/// let memory = InMemoryMemory::new();
/// memory.store(MemoryUpdate::new("session_id", "abc123").unwrap()).unwrap();
///
/// let key = MemoryKey::new("session_id").unwrap();
/// assert_eq!(memory.load(&key).unwrap(), Some("abc123".to_string()));
/// ```
#[derive(Clone, Default)]
pub struct InMemoryMemory {
    store: Arc<RwLock<HashMap<MemoryKey, String>>>,
}

impl InMemoryMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.store.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for InMemoryMemory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryMemory")
            .field("entries", &self.len())
            .finish()
    }
}

impl MemoryReader for InMemoryMemory {
    fn load(&self, key: &MemoryKey) -> Result<Option<String>, MemoryError> {
        let store = self.store.read().map_err(|e| MemoryError::LoadFailed {
            key: key.as_str().to_string(),
            reason: format!("Lock poisoned: {}", e),
        })?;
        Ok(store.get(key).cloned())
    }

    fn load_many(&self, keys: &[MemoryKey]) -> Result<Vec<Option<String>>, MemoryError> {
        let store = self.store.read().map_err(|e| MemoryError::LoadFailed {
            key: "batch".to_string(),
            reason: format!("Lock poisoned: {}", e),
        })?;
        Ok(keys.iter().map(|key| store.get(key).cloned()).collect())
    }
}

impl MemoryWriter for InMemoryMemory {
    fn store(&self, update: MemoryUpdate) -> Result<(), MemoryError> {
        let mut store = self.store.write().map_err(|e| MemoryError::StoreFailed {
            key: update.key.as_str().to_string(),
            reason: format!("Lock poisoned: {}", e),
        })?;
        store.insert(update.key, update.value);
        Ok(())
    }
}
