//! Process-wide memoization shared across hand evaluations.
//!
//! The key spaces are finite but large, so both tables are bounded by a
//! two-generation scheme: inserts land in the hot generation, and once it
//! fills up the previous generation is retired wholesale. Lookups promote
//! survivors back into the hot generation, which approximates LRU without
//! per-entry bookkeeping. Recomputing an evicted entry is always safe, so
//! inserts are idempotent and racing callers at most duplicate work.

use ahash::AHashMap;
use parking_lot::Mutex;
use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::tile::NUM_TILE_KINDS;

pub const SHANTEN_CACHE_CAPACITY: usize = 16_384;
pub const PARSE_CACHE_CAPACITY: usize = 1_024;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

#[derive(Debug, Default)]
struct Generations<K, V> {
    hot: AHashMap<K, V>,
    cold: AHashMap<K, V>,
}

/// Bounded concurrent map; holds at most `2 * capacity` entries.
#[derive(Debug)]
pub struct LruCache<K, V> {
    capacity: usize,
    inner: Mutex<Generations<K, V>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<K: Eq + Hash, V: Clone> LruCache<K, V> {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "cache capacity must be positive");
        Self {
            capacity,
            inner: Mutex::new(Generations {
                hot: AHashMap::with_capacity(capacity),
                cold: AHashMap::new(),
            }),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let mut inner = self.inner.lock();
        if let Some(value) = inner.hot.get(key) {
            let value = value.clone();
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Some(value);
        }
        if let Some((key, value)) = inner.cold.remove_entry(key) {
            Self::rotate_if_full(&mut inner, self.capacity);
            inner.hot.insert(key, value.clone());
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Some(value);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    pub fn insert(&self, key: K, value: V) {
        let mut inner = self.inner.lock();
        if !inner.hot.contains_key(&key) {
            Self::rotate_if_full(&mut inner, self.capacity);
        }
        inner.hot.insert(key, value);
    }

    fn rotate_if_full(inner: &mut Generations<K, V>, capacity: usize) {
        if inner.hot.len() >= capacity {
            let retired = inner.cold.len();
            inner.cold = std::mem::take(&mut inner.hot);
            log::trace!("cache generation rotated, {retired} entries retired");
        }
    }

    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.hot.clear();
        inner.cold.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        let inner = self.inner.lock();
        let shadowed = inner.cold.keys().filter(|k| inner.hot.contains_key(*k)).count();
        inner.hot.len() + inner.cold.len() - shadowed
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        let inner = self.inner.lock();
        inner.hot.is_empty() && inner.cold.is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

pub type ShantenKey = ([u8; NUM_TILE_KINDS], u8);

/// The memo tables every analyzer in the process shares. Constructed once
/// near startup, passed around behind an `Arc`, clearable for tests; never a
/// hidden global.
#[derive(Debug)]
pub struct MemoCache {
    /// Shanten results keyed by count histogram and meld offset.
    pub shanten: LruCache<ShantenKey, i8>,
    /// Parsed count histograms keyed by the raw hand string.
    pub counts: LruCache<String, [u8; NUM_TILE_KINDS]>,
}

impl MemoCache {
    #[must_use]
    pub fn new(shanten_capacity: usize, parse_capacity: usize) -> Self {
        Self {
            shanten: LruCache::new(shanten_capacity),
            counts: LruCache::new(parse_capacity),
        }
    }

    pub fn clear(&self) {
        self.shanten.clear();
        self.counts.clear();
    }
}

impl Default for MemoCache {
    fn default() -> Self {
        Self::new(SHANTEN_CACHE_CAPACITY, PARSE_CACHE_CAPACITY)
    }
}

#[cfg(test)]
pub mod test {
    use super::*;

    #[test]
    pub fn hit_miss_accounting() {
        let cache: LruCache<u32, u32> = LruCache::new(8);
        assert_eq!(cache.get(&1), None);
        cache.insert(1, 10);
        assert_eq!(cache.get(&1), Some(10));
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
        cache.insert(1, 10);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    pub fn rotation_bounds_len() {
        let cache: LruCache<u32, u32> = LruCache::new(4);
        for i in 0..64 {
            cache.insert(i, i);
        }
        assert!(cache.len() <= 8);
        // The newest insert survives the churn.
        assert_eq!(cache.get(&63), Some(63));
    }

    #[test]
    pub fn lookups_promote_across_generations() {
        let cache: LruCache<u32, u32> = LruCache::new(2);
        cache.insert(1, 10);
        cache.insert(2, 20);
        // Rotation retires nothing yet; 1 and 2 move to the cold generation.
        cache.insert(3, 30);
        assert_eq!(cache.get(&1), Some(10));
        // Promoting 1 kept it alive through another full rotation.
        cache.insert(4, 40);
        cache.insert(5, 50);
        assert_eq!(cache.get(&1), Some(10));
    }

    #[test]
    pub fn clear_resets_everything() {
        let cache = MemoCache::new(4, 4);
        cache.shanten.insert(([0; NUM_TILE_KINDS], 0), 8);
        cache.counts.insert("123m".to_owned(), [0; NUM_TILE_KINDS]);
        cache.clear();
        assert!(cache.shanten.is_empty());
        assert!(cache.counts.is_empty());
        assert_eq!(cache.shanten.stats(), CacheStats::default());
    }

    #[test]
    pub fn concurrent_inserts_stay_bounded() {
        let cache: LruCache<u64, u64> = LruCache::new(64);
        std::thread::scope(|scope| {
            for t in 0..4u64 {
                let cache = &cache;
                scope.spawn(move || {
                    for i in 0..1_000 {
                        cache.insert(t * 1_000 + i, i);
                        cache.get(&(t * 1_000 + i));
                    }
                });
            }
        });
        assert!(cache.len() <= 128);
    }
}
