//! Visited-entity cache for schema assembly.

use std::fmt;

use rustc_hash::FxHashMap;
use serde_json::Value;

/// Stable identity of an entity inside a structured-data graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityKey {
    /// Entity type name (e.g., "blog.Post").
    pub kind: String,
    /// Primary identity within the type (e.g., a database id).
    pub id: String,
}

impl EntityKey {
    pub fn new(kind: impl Into<String>, id: impl ToString) -> Self {
        Self {
            kind: kind.into(),
            id: id.to_string(),
        }
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Result of probing the cache before descending into an entity.
#[derive(Debug)]
pub enum CacheState {
    /// Not seen yet; a sentinel slot has been reserved.
    Fresh,
    /// Currently being computed higher up the stack (a cycle).
    InProgress,
    /// Fully computed fragment.
    Done(Value),
}

/// Memoization map guaranteeing at-most-one schema computation per
/// entity per top-level call, with an in-progress sentinel breaking
/// cycles between mutually referencing entities.
///
/// A fresh cache is created per top-level resolution by default. Callers
/// may thread one cache through many calls to reuse fragments across
/// resolutions; entries are never evicted, so such a cache grows with
/// every distinct entity it sees and can serve stale fragments. Clear
/// it when the underlying data changes.
#[derive(Debug, Default)]
pub struct SchemaCache {
    slots: FxHashMap<EntityKey, Option<Value>>,
}

impl SchemaCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Probe the slot for `key`, reserving the in-progress sentinel when
    /// the entity has not been seen yet.
    pub fn begin(&mut self, key: &EntityKey) -> CacheState {
        match self.slots.get(key) {
            Some(Some(value)) => CacheState::Done(value.clone()),
            Some(None) => CacheState::InProgress,
            None => {
                self.slots.insert(key.clone(), None);
                CacheState::Fresh
            }
        }
    }

    /// Store the computed fragment for `key`.
    pub fn finish(&mut self, key: EntityKey, value: Value) {
        self.slots.insert(key, Some(value));
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_reserves_sentinel() {
        let mut cache = SchemaCache::new();
        let key = EntityKey::new("blog.Post", 1);

        assert!(matches!(cache.begin(&key), CacheState::Fresh));
        assert!(matches!(cache.begin(&key), CacheState::InProgress));

        cache.finish(key.clone(), Value::from("fragment"));
        match cache.begin(&key) {
            CacheState::Done(v) => assert_eq!(v, Value::from("fragment")),
            other => panic!("expected Done, got {other:?}"),
        }
    }

    #[test]
    fn test_distinct_ids_are_distinct_slots() {
        let mut cache = SchemaCache::new();
        assert!(matches!(
            cache.begin(&EntityKey::new("blog.Post", 1)),
            CacheState::Fresh
        ));
        assert!(matches!(
            cache.begin(&EntityKey::new("blog.Post", 2)),
            CacheState::Fresh
        ));
        assert_eq!(cache.len(), 2);
    }
}
