use dashmap::DashMap;
use std::hash::Hash;
use std::sync::Mutex;

pub trait GetOrdKey {
    type Output: Ord + Clone;
    fn get_order_key(&self) -> Self::Output;
}

/// DashMap with a capacity. When full, the tenth of the entries with the
/// smallest order key (at least one) makes room for the new one.
pub struct LimitedMap<K, V> {
    records: DashMap<K, V>,
    limit: usize,
    lock_key: Mutex<()>,
}

impl<K, V> LimitedMap<K, V>
    where K: Eq + Hash + Clone, V: Clone + GetOrdKey {
    pub fn from(limit: usize) -> Self {
        LimitedMap {
            records: DashMap::with_capacity(limit),
            limit,
            lock_key: Mutex::new(()),
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.records.get(key).map(|r| r.value().clone())
    }

    pub fn insert(&self, key: K, value: V) {
        if self.limit == 0 {
            return;
        }
        let _guard = self.lock_key.lock().unwrap_or_else(|e| e.into_inner());
        if !self.records.contains_key(&key) && self.records.len() >= self.limit {
            let mut vec: Vec<(K, V::Output)> = self.records.iter()
                .map(|e| (e.key().clone(), e.value().get_order_key()))
                .collect();
            vec.sort_unstable_by_key(|(_, sort_key)| sort_key.clone());
            let evict_num = (self.limit / 10).max(1);
            vec.into_iter().take(evict_num).for_each(|(k, _)| {
                self.records.remove(&k);
            });
        }
        self.records.insert(key, value);
    }

    pub fn remove(&self, key: &K) {
        self.records.remove(key);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
