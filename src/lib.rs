//! lazy-hashmap: a single-threaded map whose values are either loaded or
//! backed by a producer that runs on first access and is memoized.
//!
//! ```
//! use lazy_hashmap::{LazyHashMap, LazyMap};
//!
//! let mut m: LazyHashMap<String, String> = LazyHashMap::new();
//! m.insert("loaded_key".to_string(), "value".to_string());
//! m.insert_with("unloaded_key".to_string(), || "loaded value".to_string());
//!
//! assert_eq!(m.get("unloaded_key"), Ok(Some(&"loaded value".to_string())));
//! assert!(m.contains_loaded("unloaded_key"));
//! assert_eq!(m.len(), 2);
//! ```
//!
//! Internal Design:
//!
//! Summary
//! - Layers:
//!   - `LazyMap<K, V, E>`: trait with the five-operation capability set
//!     (loaded lookup, producer lookup, value/producer binding, key set)
//!     and the provided algorithms `get` and `entries`. Any backing store
//!     implementing the capabilities gets the same resolution semantics.
//!   - `LazyHashMap<K, V, E, S>`: two `hashbrown` tables, one for loaded
//!     values and one for boxed producers.
//!   - `LazyEntry`: tagged view entry, loaded or deferred.
//!
//! Tier invariant
//! - A key lives in at most one tier. Inserting a value removes the
//!   pending producer for that key.
//! - Inserting a producer does not touch the loaded tier. A loaded value
//!   bound earlier keeps shadowing the producer, and `len()` counts the key
//!   in both tiers until one of them is removed.
//!
//! Resolution
//! - `get` returns a loaded value without evaluating anything.
//! - Otherwise the producer runs. `Ok(Some(v))` is cached and the producer
//!   dropped, so it never runs again for that key.
//! - `Ok(None)` and `Err(e)` are not cached; the producer stays bound and
//!   the next `get` runs it again. Errors reach the caller unchanged.
//!
//! Views
//! - `key_set` and `entries` never evaluate. A deferred entry runs its
//!   producer each time its value is read and does not write back.
//! - `values` forces every pending producer and caches the results.
//! - `contains_value` is refused with `UnsupportedOperation`.
//!
//! Constraints
//! - Single-threaded: producers are `dyn Fn` without `Send`/`Sync`.
//!   Mutation takes `&mut self`, so a producer cannot reenter its own map.
//! - Producers are `'static`; shared state they capture (`Rc<Cell<_>>`,
//!   ...) is owned by whoever created them.
//! - Iteration order is unspecified.
//!
//! Logging
//! - Through the `log` facade at `trace`/`debug` level only. Producer
//!   failures are returned, never logged.

mod entry;
mod error;
mod lazy_hash_map;
mod lazy_map;

// Public surface
pub use entry::{Entries, EntryValue, LazyEntry};
pub use error::UnsupportedOperation;
pub use lazy_hash_map::LazyHashMap;
pub use lazy_map::{KeySet, LazyMap, Producer};
