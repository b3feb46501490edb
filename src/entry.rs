//! Read-only entry views over a LazyMap.

use crate::error::UnsupportedOperation;
use crate::lazy_map::Producer;
use core::fmt;
use core::iter::FusedIterator;
use core::ops::Deref;

/// One entry of a map view: either a resolved value or a reference to the
/// producer that would compute it.
pub enum LazyEntry<'a, K, V, E> {
    Loaded { key: &'a K, value: &'a V },
    Deferred { key: &'a K, producer: &'a Producer<V, E> },
}

impl<'a, K, V, E> LazyEntry<'a, K, V, E> {
    pub fn key(&self) -> &'a K {
        match *self {
            LazyEntry::Loaded { key, .. } | LazyEntry::Deferred { key, .. } => key,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LazyEntry::Loaded { .. })
    }

    /// Read the entry's value. A deferred entry invokes its producer on
    /// every call; the result is not written back into the map.
    pub fn value(&self) -> Result<Option<EntryValue<'a, V>>, E> {
        match *self {
            LazyEntry::Loaded { value, .. } => Ok(Some(EntryValue::Loaded(value))),
            LazyEntry::Deferred { producer, .. } => Ok(producer()?.map(EntryValue::Produced)),
        }
    }

    /// View entries are projections; they cannot be written through.
    pub fn set_value(&mut self, _value: V) -> Result<V, UnsupportedOperation> {
        Err(UnsupportedOperation::ReplaceValue)
    }
}

impl<K, V, E> Clone for LazyEntry<'_, K, V, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, E> Copy for LazyEntry<'_, K, V, E> {}

impl<K: fmt::Debug, V: fmt::Debug, E> fmt::Debug for LazyEntry<'_, K, V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LazyEntry::Loaded { key, value } => f
                .debug_struct("Loaded")
                .field("key", key)
                .field("value", value)
                .finish(),
            LazyEntry::Deferred { key, .. } => {
                f.debug_struct("Deferred").field("key", key).finish_non_exhaustive()
            }
        }
    }
}

/// Value read from a `LazyEntry`: borrowed from the loaded tier, or freshly
/// produced and owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValue<'a, V> {
    Loaded(&'a V),
    Produced(V),
}

impl<V> EntryValue<'_, V> {
    pub fn is_produced(&self) -> bool {
        matches!(self, EntryValue::Produced(_))
    }

    pub fn into_owned(self) -> V
    where
        V: Clone,
    {
        match self {
            EntryValue::Loaded(v) => v.clone(),
            EntryValue::Produced(v) => v,
        }
    }
}

impl<V> Deref for EntryValue<'_, V> {
    type Target = V;

    fn deref(&self) -> &V {
        match self {
            EntryValue::Loaded(v) => v,
            EntryValue::Produced(v) => v,
        }
    }
}

/// Iterator over a snapshot of entries; order is unspecified.
pub struct Entries<'a, K, V, E> {
    inner: std::vec::IntoIter<LazyEntry<'a, K, V, E>>,
}

impl<'a, K, V, E> Entries<'a, K, V, E> {
    pub(crate) fn new(entries: Vec<LazyEntry<'a, K, V, E>>) -> Self {
        Self {
            inner: entries.into_iter(),
        }
    }
}

impl<'a, K, V, E> Iterator for Entries<'a, K, V, E> {
    type Item = LazyEntry<'a, K, V, E>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, E> ExactSizeIterator for Entries<'_, K, V, E> {}

impl<K, V, E> FusedIterator for Entries<'_, K, V, E> {}
