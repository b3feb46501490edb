//! LazyHashMap: two hashbrown tables, one holding loaded values and one
//! holding pending producers.

use crate::error::UnsupportedOperation;
use crate::lazy_map::{KeySet, LazyMap, Producer};
use core::borrow::Borrow;
use core::convert::Infallible;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::Values;
use hashbrown::HashMap;
use std::collections::hash_map::RandomState;

pub struct LazyHashMap<K, V, E = Infallible, S = RandomState> {
    loaded: HashMap<K, V, S>,
    pending: HashMap<K, Box<Producer<V, E>>, S>, // keys not yet resolved
}

impl<K, V, E> LazyHashMap<K, V, E>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }

    /// Preallocate both tiers for `capacity` entries. A capacity of zero is
    /// accepted and allocates nothing, like `new()`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, Default::default())
    }
}

impl<K, V, E, S> Default for LazyHashMap<K, V, E, S>
where
    K: Eq + Hash,
    S: BuildHasher + Clone + Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, E, S> LazyHashMap<K, V, E, S>
where
    K: Eq + Hash,
    S: BuildHasher + Clone + Default,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            loaded: HashMap::with_hasher(hasher.clone()),
            pending: HashMap::with_hasher(hasher),
        }
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            loaded: HashMap::with_capacity_and_hasher(capacity, hasher.clone()),
            pending: HashMap::with_capacity_and_hasher(capacity, hasher),
        }
    }

    /// Loaded plus pending entries.
    pub fn len(&self) -> usize {
        self.loaded.len() + self.pending.len()
    }
    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty() && self.pending.is_empty()
    }

    pub fn loaded_len(&self) -> usize {
        self.loaded.len()
    }
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.loaded.contains_key(key) || self.pending.contains_key(key)
    }

    /// True iff a producer is bound for `key`. Never invokes it.
    pub fn contains_pending<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.pending.contains_key(key)
    }

    /// Always fails: answering would mean evaluating every producer.
    pub fn contains_value(&self, _value: &V) -> Result<bool, UnsupportedOperation> {
        Err(UnsupportedOperation::ContainsValue)
    }

    /// Bind a producer returning a plain value.
    pub fn insert_with<F>(&mut self, key: K, default: F) -> Option<Box<Producer<V, E>>>
    where
        F: Fn() -> V + 'static,
    {
        self.insert_producer(
            key,
            Box::new(move || -> Result<Option<V>, E> { Ok(Some(default())) }),
        )
    }

    /// Bind a producer that may fail or come back empty.
    pub fn insert_lazy<F>(&mut self, key: K, producer: F) -> Option<Box<Producer<V, E>>>
    where
        F: Fn() -> Result<Option<V>, E> + 'static,
    {
        self.insert_producer(key, Box::new(producer))
    }

    /// Remove `key` from the loaded tier, or failing that, drop its pending
    /// producer. Only a loaded value is returned.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.loaded.remove(key) {
            Some(value) => Some(value),
            None => {
                self.pending.remove(key);
                None
            }
        }
    }

    pub fn clear(&mut self) {
        self.loaded.clear();
        self.pending.clear();
    }

    /// Evaluate every pending producer, then iterate all loaded values.
    ///
    /// Produced values are cached. Empty results stay pending. On the first
    /// failure the error is returned; the failing key and every key not yet
    /// visited stay pending, values produced before it stay loaded.
    ///
    /// Producers run while the tiers are untouched, so a panicking producer
    /// leaves the map as it was.
    pub fn values(&mut self) -> Result<Values<'_, K, V>, E>
    where
        K: Clone,
    {
        if !self.pending.is_empty() {
            log::debug!("materializing {} pending entries", self.pending.len());
        }

        let mut produced = Vec::new();
        let mut failure = None;
        for (key, producer) in &self.pending {
            if self.loaded.contains_key(key) {
                // Shadowed by a loaded value; `get` would never run it either.
                continue;
            }
            match producer() {
                Ok(Some(value)) => produced.push((key.clone(), value)),
                Ok(None) => {}
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }

        for (key, value) in produced {
            self.pending.remove(&key);
            self.loaded.insert(key, value);
        }
        match failure {
            Some(e) => Err(e),
            None => Ok(self.loaded.values()),
        }
    }
}

impl<K, V, E, S> LazyMap<K, V, E> for LazyHashMap<K, V, E, S>
where
    K: Eq + Hash,
    S: BuildHasher + Clone + Default,
{
    type Hasher = S;

    fn contains_loaded<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.loaded.contains_key(key)
    }

    fn get_loaded<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.loaded.get(key)
    }

    fn producer<Q>(&self, key: &Q) -> Option<&Producer<V, E>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.pending.get(key).map(|p| p.as_ref())
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        // An explicit value supersedes laziness.
        self.pending.remove(&key);
        self.loaded.insert(key, value)
    }

    fn insert_producer(
        &mut self,
        key: K,
        producer: Box<Producer<V, E>>,
    ) -> Option<Box<Producer<V, E>>> {
        self.pending.insert(key, producer)
    }

    fn key_set(&self) -> KeySet<'_, K, S> {
        let hasher = self.loaded.hasher().clone();
        let mut keys = KeySet::with_capacity_and_hasher(self.len(), hasher);
        keys.extend(self.loaded.keys());
        keys.extend(self.pending.keys());
        keys
    }
}

impl<K, V, E, S> Extend<(K, V)> for LazyHashMap<K, V, E, S>
where
    K: Eq + Hash,
    S: BuildHasher + Clone + Default,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            LazyMap::insert(self, key, value);
        }
    }
}

impl<K, V, E, S> FromIterator<(K, V)> for LazyHashMap<K, V, E, S>
where
    K: Eq + Hash,
    S: BuildHasher + Clone + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K: fmt::Debug, V: fmt::Debug, E, S> fmt::Debug for LazyHashMap<K, V, E, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyHashMap")
            .field("loaded", &self.loaded)
            .field("pending", &self.pending.keys().collect::<Vec<_>>())
            .finish()
    }
}
