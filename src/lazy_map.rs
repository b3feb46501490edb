//! LazyMap: the storage-agnostic resolution algorithm.
//!
//! A concrete store only has to answer "is it loaded", "what is loaded",
//! "what is pending" and accept new bindings. `get` and `entries` are
//! written once here on top of those capabilities.

use crate::entry::{Entries, LazyEntry};
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use std::collections::hash_map::RandomState;

/// A deferred value. `Ok(Some(v))` is a value, `Ok(None)` means the
/// producer had nothing to offer this time, `Err(e)` is a failure.
pub type Producer<V, E> = dyn Fn() -> Result<Option<V>, E>;

/// Keys of both tiers, deduplicated. Hashed with the store's own hasher.
pub type KeySet<'a, K, S = RandomState> = hashbrown::HashSet<&'a K, S>;

pub trait LazyMap<K, V, E>
where
    K: Eq + Hash,
{
    /// Hasher used for the sets returned by `key_set`.
    type Hasher: BuildHasher;

    /// True iff `key` has a resolved value. Never evaluates.
    fn contains_loaded<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq;

    /// The resolved value for `key`, if any. Never evaluates.
    fn get_loaded<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq;

    /// The pending producer for `key`, if any. Never invokes it.
    fn producer<Q>(&self, key: &Q) -> Option<&Producer<V, E>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq;

    /// Bind a concrete value, dropping any pending producer for `key`.
    /// Returns the previously loaded value.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Bind a producer. The loaded tier is left untouched, so a value
    /// already loaded for `key` keeps shadowing the producer.
    /// Returns the previously bound producer.
    fn insert_producer(
        &mut self,
        key: K,
        producer: Box<Producer<V, E>>,
    ) -> Option<Box<Producer<V, E>>>;

    /// Union of loaded and pending keys. Never evaluates.
    fn key_set(&self) -> KeySet<'_, K, Self::Hasher>;

    /// Resolve `key`, evaluating its producer on first access.
    ///
    /// A produced value is memoized and the producer dropped. Failures and
    /// empty results are not memoized: the producer stays bound and runs
    /// again on the next call. Producer errors are returned unchanged.
    fn get<Q>(&mut self, key: &Q) -> Result<Option<&V>, E>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq + ToOwned<Owned = K>,
    {
        if self.contains_loaded(key) {
            return Ok(self.get_loaded(key));
        }
        let produced = match self.producer(key) {
            Some(producer) => {
                log::trace!("evaluating deferred value");
                producer()?
            }
            None => return Ok(None),
        };
        match produced {
            Some(value) => {
                self.insert(key.to_owned(), value);
                log::trace!("deferred value cached");
                Ok(self.get_loaded(key))
            }
            None => {
                log::trace!("producer yielded no value; entry stays pending");
                Ok(None)
            }
        }
    }

    /// Snapshot of all entries. Loaded keys yield their value, pending keys
    /// yield a deferred entry whose producer only runs when read.
    fn entries(&self) -> Entries<'_, K, V, E> {
        let keys = self.key_set();
        let mut entries = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(value) = self.get_loaded(key) {
                entries.push(LazyEntry::Loaded { key, value });
            } else if let Some(producer) = self.producer(key) {
                entries.push(LazyEntry::Deferred { key, producer });
            }
        }
        Entries::new(entries)
    }
}
