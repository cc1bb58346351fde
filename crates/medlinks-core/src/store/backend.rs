//! Key-Value Backends
//!
//! The store only needs whole-value reads and writes keyed by string.
//! The browser frontend implements this over `localStorage`.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::error::{StoreError, StoreResult};

/// Whole-value key-value persistence
///
/// `set` must replace the value atomically from the caller's viewpoint:
/// either the new value is stored or the old one is left untouched.
pub trait KeyValueBackend {
    /// Read the raw value stored under `key`
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Overwrite the value stored under `key`
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
}

impl<B: KeyValueBackend + ?Sized> KeyValueBackend for &B {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }
}

impl<B: KeyValueBackend + ?Sized> KeyValueBackend for Box<B> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }
}

/// In-memory backend for tests and non-browser hosts
#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: RefCell<HashMap<String, String>>,
    read_only: Cell<bool>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every subsequent write, simulating a full or locked storage.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
    }

    /// Store a raw value, bypassing the read-only flag.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        if self.read_only.get() {
            return Err(StoreError::Write {
                key: key.to_string(),
                reason: "backend is read-only".to_string(),
            });
        }
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_roundtrip() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.get("k").unwrap(), None);
        backend.set("k", "v").unwrap();
        assert_eq!(backend.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_read_only_keeps_previous_value() {
        let backend = MemoryBackend::new();
        backend.set("k", "old").unwrap();
        backend.set_read_only(true);
        assert!(matches!(backend.set("k", "new"), Err(StoreError::Write { .. })));
        assert_eq!(backend.raw("k").as_deref(), Some("old"));
    }
}
