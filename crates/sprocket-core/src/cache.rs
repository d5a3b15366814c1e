use std::{
    any::Any,
    collections::HashMap,
    fmt,
    sync::{Arc, RwLock},
};

/// A cached, immutable table shared across callers. Concrete entry types
/// (field-descriptor tables, parameter lists) are downcast by the engine.
pub type CacheValue = Arc<dyn Any + Send + Sync>;

/// Process-wide lookup for per-type and per-procedure metadata.
///
/// Keys are fully-qualified type names or procedure names. Once a key is
/// present its value is treated as permanently valid: there is no
/// invalidation path and no TTL. The get/set pair is check-then-populate
/// without an atomic read-through, which is safe because stored values are
/// immutable and structurally equal; a duplicate population under race is
/// wasted work, not corruption.
pub trait Cache: Send + Sync + 'static {
    fn get(&self, key: &str) -> Option<CacheValue>;
    fn set(&self, key: &str, value: CacheValue);
}

/// The default in-memory cache, shared for the process lifetime.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CacheValue>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cache for MemoryCache {
    fn get(&self, key: &str) -> Option<CacheValue> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: CacheValue) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_owned(), value);
    }
}

impl fmt::Debug for MemoryCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        f.debug_struct("MemoryCache")
            .field("len", &entries.len())
            .finish()
    }
}
