use std::{
    collections::{BTreeSet, HashMap},
    sync::{Arc, RwLock},
};

use super::{TypeDesc, TypeNameMode};

/// What a rendering depends on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct CacheKey {
    ty: TypeDesc,
    mode: TypeNameMode,
    available: Option<Arc<BTreeSet<String>>>,
}

impl CacheKey {
    pub(crate) fn new(ty: &TypeDesc, mode: TypeNameMode, available: &Arc<BTreeSet<String>>) -> Self {
        Self {
            ty: ty.clone(),
            mode,
            // Unqualified names do not depend on the available namespaces.
            available: match mode {
                TypeNameMode::Qualified => Some(Arc::clone(available)),
                TypeNameMode::Unqualified => None,
            },
        }
    }
}

/// Memoized type renderings, shareable across formatters and threads.
///
/// Lookups take a read lock; a miss renders outside any lock and then
/// inserts. Two threads missing the same key both render it, and the first
/// insert wins.
#[derive(Debug, Default)]
pub struct TypeNameCache {
    entries: RwLock<HashMap<CacheKey, String>>,
}

impl TypeNameCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache ready to be shared.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub(crate) fn get_or_insert_with(&self, key: CacheKey, render: impl FnOnce() -> String) -> String {
        if let Ok(entries) = self.entries.read()
            && let Some(hit) = entries.get(&key)
        {
            return hit.clone();
        }

        let rendered = render();
        if let Ok(mut entries) = self.entries.write() {
            return entries.entry(key).or_insert(rendered).clone();
        }
        rendered
    }

    /// Number of cached renderings.
    pub fn len(&self) -> usize {
        self.entries.read().map_or(0, |entries| entries.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::type_name::{NamedType, Primitive, TypeNameFormatter};

    fn sample() -> TypeDesc {
        NamedType::constructed(
            Some("System.Collections.Generic"),
            "List",
            vec![Primitive::Int.into()],
        )
        .into()
    }

    #[test]
    fn test_cache_hit_returns_same_text() {
        let cache = TypeNameCache::shared();
        let formatter = TypeNameFormatter::new().with_cache(Arc::clone(&cache));

        let first = formatter.qualified(&sample());
        let second = formatter.qualified(&sample());

        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_keyed_by_available_namespaces() {
        let cache = TypeNameCache::shared();
        let plain = TypeNameFormatter::new().with_cache(Arc::clone(&cache));
        let using = TypeNameFormatter::new()
            .with_available_namespaces(["System.Collections.Generic"])
            .with_cache(Arc::clone(&cache));

        assert_eq!(plain.qualified(&sample()), "System.Collections.Generic.List<int>");
        assert_eq!(using.qualified(&sample()), "List<int>");
        assert_eq!(cache.len(), 2);

        // Unqualified renderings are shared between both formatters.
        plain.unqualified(&sample());
        using.unqualified(&sample());
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_concurrent_population() {
        let cache = TypeNameCache::shared();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    let formatter = TypeNameFormatter::new().with_cache(cache);
                    formatter.qualified(&sample())
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), "System.Collections.Generic.List<int>");
        }
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear() {
        let cache = TypeNameCache::shared();
        TypeNameFormatter::new()
            .with_cache(Arc::clone(&cache))
            .unqualified(&sample());
        assert!(!cache.is_empty());
        cache.clear();
        assert!(cache.is_empty());
    }
}
