//! chained-collections: a separate-chaining hash map keyed by djb2 text
//! hashes, plus a doubling dynamic array.
//!
//! Internal Design:
//!
//! Summary
//! - `AssocMap<K, V>`: bucket array of singly-linked chains. Buckets hold
//!   the slot key of their head node; nodes live in a `SlotMap` arena and
//!   link to the next node of the same bucket.
//! - `Sequence<T>`: contiguous storage with index-shifting insert/remove and
//!   capacity doubling when full. Independent of the map.
//!
//! Hashing
//! - Keys expose their character sequence through `KeyText`; the bucket
//!   hash is djb2 (`h = h * 33 + c`, seed 5381, wrapping `u64`) over the
//!   UTF-8 bytes of that text. Bucket index is `hash % capacity`.
//! - The hash is computed once at insertion and stored in the node.
//!   Rehash-grow recomputes bucket indices from the stored hash only.
//!
//! Growth
//! - Before every insert that adds a node, if
//!   `(len + 1) * 100 / capacity >= load_factor_percent` the bucket array
//!   doubles and every node is relinked (not copied) into it.
//! - Capacity never shrinks; removal only unlinks.
//!
//! Duplicate keys
//! - `DuplicatePolicy::Shadow` (default): insert never inspects the chain.
//!   A repeated key pushes a new head node that hides the older one from
//!   `lookup`; the older node stays allocated and counted in `len` until it
//!   is removed in turn or the map is destroyed.
//! - `DuplicatePolicy::Overwrite`: insert replaces the value of the first
//!   matching node and returns the old value.
//!
//! Errors
//! - Every fallible operation returns `Result<_, Error>`:
//!   `InvalidArgument` at construction, `IndexOutOfRange` for sequence
//!   positions, `KeyNotFound` for map lookups and removals.
//!
//! Notes and non-goals
//! - Single-threaded: no operation blocks or synchronizes. Both types are
//!   `Send` when their contents are, so callers may wrap them in a mutex.
//! - No iteration API, no serialization, no shrink-on-remove, no open
//!   addressing.
//! - Re-entering a map from a key's `PartialEq` during a chain walk panics
//!   in debug builds.

mod assoc_map;
mod assoc_map_proptest;
mod config;
mod error;
pub mod key_text;
mod reentrancy;
mod sequence;

// Public surface
pub use assoc_map::AssocMap;
pub use config::{
    DuplicatePolicy, MapConfig, DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_FACTOR_PERCENT,
};
pub use error::{Error, Result};
pub use key_text::{djb2, KeyText};
pub use sequence::{Sequence, DEFAULT_SEQUENCE_CAPACITY};
