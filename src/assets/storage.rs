use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use slotmap::{Key, SlotMap};
use std::sync::Arc;

// Internal data structure, protected by a lock.
struct StorageInner<H: Key, T> {
    map: SlotMap<H, Arc<T>>,
    lookup: FxHashMap<String, H>,
}

impl<H: Key, T> Default for StorageInner<H, T> {
    fn default() -> Self {
        Self {
            map: SlotMap::default(),
            lookup: FxHashMap::default(),
        }
    }
}

/// Thread-safe asset container addressed by handle or by storage key.
pub struct AssetStorage<H: Key, T> {
    inner: RwLock<StorageInner<H, T>>,
}

impl<H: Key, T> Default for AssetStorage<H, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Key, T> AssetStorage<H, T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::default(),
        }
    }

    /// [Write] Create-or-update under `key`.
    ///
    /// An existing entry is overwritten in place and keeps its handle, so
    /// repeated writes to one key never leave orphaned copies behind.
    /// Returns the handle and whether an entry was replaced.
    pub fn insert_or_replace(&self, key: &str, asset: impl Into<T>) -> (H, bool) {
        let mut guard = self.inner.write();
        let inner = &mut *guard;
        let asset = Arc::new(asset.into());

        if let Some(&handle) = inner.lookup.get(key)
            && let Some(slot) = inner.map.get_mut(handle)
        {
            *slot = asset;
            return (handle, true);
        }

        let handle = inner.map.insert(asset);
        inner.lookup.insert(key.to_string(), handle);
        (handle, false)
    }

    /// [Read] Gets a single resource.
    pub fn get(&self, handle: H) -> Option<Arc<T>> {
        let guard = self.inner.read();
        guard.map.get(handle).cloned()
    }

    pub fn get_by_key(&self, key: &str) -> Option<Arc<T>> {
        let guard = self.inner.read();
        let handle = guard.lookup.get(key)?;
        guard.map.get(*handle).cloned()
    }

    pub fn handle_for_key(&self, key: &str) -> Option<H> {
        let guard = self.inner.read();
        guard.lookup.get(key).copied()
    }

    /// [Write] Removes the entry under `key`; its handle becomes invalid.
    pub fn remove_by_key(&self, key: &str) -> Option<Arc<T>> {
        let mut guard = self.inner.write();
        let handle = guard.lookup.remove(key)?;
        guard.map.remove(handle)
    }

    /// Keys starting with `prefix`, in no particular order.
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        let guard = self.inner.read();
        guard
            .lookup
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::new_key_type;

    new_key_type! { struct TestHandle; }

    #[test]
    fn insert_or_replace_keeps_handle() {
        let storage = AssetStorage::<TestHandle, String>::new();
        let (h1, replaced) = storage.insert_or_replace("a", "first".to_string());
        assert!(!replaced);
        let (h2, replaced) = storage.insert_or_replace("a", "second".to_string());
        assert!(replaced);

        assert_eq!(h1, h2);
        assert_eq!(storage.len(), 1);
        assert_eq!(&**storage.get(h1).unwrap(), "second");
        assert_eq!(storage.handle_for_key("a"), Some(h1));
    }

    #[test]
    fn keys_are_independent() {
        let storage = AssetStorage::<TestHandle, i32>::new();
        let (a, _) = storage.insert_or_replace("a", 1);
        let (b, _) = storage.insert_or_replace("b", 2);

        assert_ne!(a, b);
        assert_eq!(*storage.get_by_key("b").unwrap(), 2);
        assert!(storage.get_by_key("c").is_none());
    }

    #[test]
    fn old_arc_survives_replacement() {
        let storage = AssetStorage::<TestHandle, i32>::new();
        let (h, _) = storage.insert_or_replace("a", 1);
        let old = storage.get(h).unwrap();
        storage.insert_or_replace("a", 2);

        assert_eq!(*old, 1);
        assert_eq!(*storage.get(h).unwrap(), 2);
    }

    #[test]
    fn remove_by_key_invalidates_handle() {
        let storage = AssetStorage::<TestHandle, i32>::new();
        let (a, _) = storage.insert_or_replace("mesh/a", 1);
        storage.insert_or_replace("mesh/b", 2);
        storage.insert_or_replace("other/c", 3);

        assert_eq!(storage.remove_by_key("mesh/a").as_deref(), Some(&1));
        assert!(storage.get(a).is_none());
        assert!(storage.remove_by_key("mesh/a").is_none());
        assert_eq!(storage.len(), 2);
        assert_eq!(storage.keys_with_prefix("mesh/"), vec!["mesh/b".to_string()]);
    }
}
