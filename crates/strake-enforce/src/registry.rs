//! Singleton registry: at-most-one instance per opted-in type.
//!
//! Each entry is a per-type cell guarding lazy first construction. Racing
//! first-construction calls from multiple threads serialize on the entry's
//! mutex, so exactly one instance is ever created and every caller observes
//! the same `Arc`. A poisoned lock is recovered rather than propagated:
//! the cell holds no invariant beyond "set at most once".

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use strake_core::violation::Violation;

use crate::descriptor::Instance;

/// The at-most-one-instance cell for a singleton type.
pub struct SingletonCell {
    slot: Mutex<Option<Arc<Instance>>>,
}

impl SingletonCell {
    pub fn new() -> Self {
        SingletonCell {
            slot: Mutex::new(None),
        }
    }

    /// Return the cached instance, creating it with `create` if absent.
    /// The lock is held across creation so racing callers serialize.
    pub fn get_or_create<F>(&self, create: F) -> Result<Arc<Instance>, Violation>
    where
        F: FnOnce() -> Result<Instance, Violation>,
    {
        let mut guard = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = &*guard {
            return Ok(existing.clone());
        }
        let instance = Arc::new(create()?);
        *guard = Some(instance.clone());
        Ok(instance)
    }

    /// The cached instance, if first construction has happened.
    pub fn get(&self) -> Option<Arc<Instance>> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.get().is_some()
    }
}

impl Default for SingletonCell {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SingletonCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingletonCell")
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

/// Registry of singleton cells keyed by type-identity hash.
/// Owned by the enforcement engine; entries live for the process lifetime.
#[derive(Debug, Default)]
pub struct SingletonRegistry {
    entries: Mutex<HashMap<String, Arc<SingletonCell>>>,
}

impl SingletonRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch or create the cell for a type identity.
    pub fn entry(&self, identity: &str) -> Arc<SingletonCell> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries
            .entry(identity.to_string())
            .or_insert_with(|| Arc::new(SingletonCell::new()))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
