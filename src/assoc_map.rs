//! AssocMap: separate-chaining hash map with load-factor driven doubling.
//!
//! Layout
//! - `heads[i]` is the first node of bucket `i`, or `None`. Its length is the
//!   map's capacity.
//! - Nodes live in a `SlotMap` arena and link to the next node of the same
//!   bucket by slot key. A node is reachable from exactly one head.
//! - `count` is the arena length, so it always equals the number of
//!   reachable nodes.
//!
//! Each node keeps the djb2 hash computed at insertion; rehash-grow only
//! recomputes the bucket index, never calls `KeyText` again.

use crate::config::{DuplicatePolicy, MapConfig};
use crate::error::{Error, Result};
use crate::key_text::{hash_key, KeyText};
use crate::reentrancy::WalkGuard;
use core::borrow::Borrow;
use core::fmt;
use slotmap::{DefaultKey, SlotMap};

#[derive(Debug)]
struct ChainNode<K, V> {
    key: K,
    value: V,
    hash: u64,
    next: Option<DefaultKey>,
}

pub struct AssocMap<K, V> {
    heads: Vec<Option<DefaultKey>>,
    nodes: SlotMap<DefaultKey, ChainNode<K, V>>,
    config: MapConfig,
    walk: WalkGuard,
    // reused by rehash-grow to replay each chain tail-first
    scratch: Vec<DefaultKey>,
}

impl<K, V> Default for AssocMap<K, V> {
    fn default() -> Self {
        Self::from_valid(MapConfig::default())
    }
}

impl<K, V> fmt::Debug for AssocMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssocMap")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("load_factor_percent", &self.config.load_factor_percent)
            .field("duplicates", &self.config.duplicates)
            .finish()
    }
}

impl<K, V> AssocMap<K, V> {
    /// Create a map with `initial_capacity` buckets that doubles once
    /// `(len + 1) * 100 / capacity` reaches `load_factor_percent`.
    pub fn new(initial_capacity: usize, load_factor_percent: u32) -> Result<Self> {
        Self::with_config(
            MapConfig::new()
                .initial_capacity(initial_capacity)
                .load_factor_percent(load_factor_percent),
        )
    }

    pub fn with_config(config: MapConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: MapConfig) -> Self {
        Self {
            heads: vec![None; config.initial_capacity],
            nodes: SlotMap::with_key(),
            config,
            walk: WalkGuard::new(),
            scratch: Vec::new(),
        }
    }

    /// Number of live nodes, shadowed duplicates included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Current bucket count.
    pub fn capacity(&self) -> usize {
        self.heads.len()
    }

    pub fn load_factor_percent(&self) -> u32 {
        self.config.load_factor_percent
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.config.duplicates
    }

    /// Drop every node and release the bucket array. Length and capacity
    /// read 0 afterwards; the next `insert` re-allocates the configured
    /// initial capacity.
    pub fn destroy(&mut self) {
        log::debug!(
            "assoc map destroy: dropping {} nodes across {} buckets",
            self.nodes.len(),
            self.heads.len()
        );
        self.heads = Vec::new();
        self.nodes = SlotMap::with_key();
        self.scratch = Vec::new();
    }

    #[inline]
    fn slot_for(hash: u64, capacity: usize) -> usize {
        (hash % capacity as u64) as usize
    }

    /// Double the bucket array and relink every node by its stored hash.
    ///
    /// Each old chain is replayed tail-first so that head insertion into the
    /// new chain keeps the relative order of nodes that land together; a
    /// shadowed duplicate therefore stays behind the entry that shadows it.
    fn grow(&mut self) {
        let old_capacity = self.heads.len();
        let new_capacity = old_capacity * 2;
        let old_heads = core::mem::replace(&mut self.heads, vec![None; new_capacity]);

        for head in old_heads {
            self.scratch.clear();
            let mut cur = head;
            while let Some(id) = cur {
                self.scratch.push(id);
                cur = self.nodes[id].next;
            }
            while let Some(id) = self.scratch.pop() {
                let node = &mut self.nodes[id];
                let slot = Self::slot_for(node.hash, new_capacity);
                node.next = self.heads[slot];
                self.heads[slot] = Some(id);
            }
        }

        log::trace!(
            "assoc map rehash-grow: capacity {} -> {} with {} nodes",
            old_capacity,
            new_capacity,
            self.nodes.len()
        );
    }

    /// Length of the chain hanging off `bucket`.
    #[cfg(test)]
    pub(crate) fn chain_len(&self, bucket: usize) -> usize {
        let mut n = 0;
        let mut cur = self.heads.get(bucket).copied().flatten();
        while let Some(id) = cur {
            n += 1;
            cur = self.nodes[id].next;
        }
        n
    }
}

impl<K, V> AssocMap<K, V>
where
    K: KeyText + Eq,
{
    /// First node matching `q`, walking its chain from the head.
    fn find_node<Q>(&self, q: &Q) -> Option<DefaultKey>
    where
        K: Borrow<Q>,
        Q: ?Sized + KeyText + Eq,
    {
        if self.heads.is_empty() {
            return None;
        }
        let hash = hash_key(q);
        let _w = self.walk.enter();
        let mut cur = self.heads[Self::slot_for(hash, self.heads.len())];
        while let Some(id) = cur {
            let node = &self.nodes[id];
            if node.hash == hash && node.key.borrow() == q {
                return Some(id);
            }
            cur = node.next;
        }
        None
    }

    /// Bucket index `q` hashes to under the current capacity.
    pub fn bucket_of<Q>(&self, q: &Q) -> Option<usize>
    where
        Q: ?Sized + KeyText,
    {
        if self.heads.is_empty() {
            return None;
        }
        Some(Self::slot_for(hash_key(q), self.heads.len()))
    }

    /// Insert `key -> value` at the head of its chain.
    ///
    /// Under `DuplicatePolicy::Shadow` no existing node is inspected: a
    /// repeated key adds a second node that hides the first from `lookup`,
    /// and `None` is returned. Under `DuplicatePolicy::Overwrite` the first
    /// matching node has its value replaced and the old value is returned;
    /// the map does not grow in that case.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if self.heads.is_empty() {
            self.heads = vec![None; self.config.initial_capacity];
        }

        if self.config.duplicates == DuplicatePolicy::Overwrite {
            if let Some(id) = self.find_node(&key) {
                let node = &mut self.nodes[id];
                return Some(core::mem::replace(&mut node.value, value));
            }
        }

        let threshold = self.config.load_factor_percent as usize;
        if (self.nodes.len() + 1) * 100 / self.heads.len() >= threshold {
            self.grow();
        }

        let hash = hash_key(&key);
        let slot = Self::slot_for(hash, self.heads.len());
        let next = self.heads[slot];
        let id = self.nodes.insert(ChainNode {
            key,
            value,
            hash,
            next,
        });
        self.heads[slot] = Some(id);
        None
    }

    /// Value of the first node matching `q`, or `KeyNotFound`.
    pub fn lookup<Q>(&self, q: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + KeyText + Eq,
    {
        let id = self.find_node(q).ok_or(Error::KeyNotFound)?;
        Ok(&self.nodes[id].value)
    }

    pub fn lookup_mut<Q>(&mut self, q: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + KeyText + Eq,
    {
        let id = self.find_node(q).ok_or(Error::KeyNotFound)?;
        Ok(&mut self.nodes[id].value)
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + KeyText + Eq,
    {
        self.find_node(q).is_some()
    }

    /// Unlink the first node matching `q` and return its value. An older
    /// shadowed node with the same key becomes visible again.
    pub fn remove<Q>(&mut self, q: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + KeyText + Eq,
    {
        if self.heads.is_empty() {
            return Err(Error::KeyNotFound);
        }
        let hash = hash_key(q);
        let slot = Self::slot_for(hash, self.heads.len());

        let unlinked = {
            let _w = self.walk.enter();
            let mut prev: Option<DefaultKey> = None;
            let mut cur = self.heads[slot];
            let mut found = None;
            while let Some(id) = cur {
                let node = &self.nodes[id];
                let next = node.next;
                if node.hash == hash && node.key.borrow() == q {
                    match prev {
                        None => self.heads[slot] = next,
                        Some(p) => self.nodes[p].next = next,
                    }
                    found = Some(id);
                    break;
                }
                prev = Some(id);
                cur = next;
            }
            found
        };

        // Chain is consistent again; K/V drops may touch the map.
        let id = unlinked.ok_or(Error::KeyNotFound)?;
        self.nodes
            .remove(id)
            .map(|node| node.value)
            .ok_or(Error::KeyNotFound)
    }
}
