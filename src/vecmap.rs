//! An insertion-ordered map backed by a [`Vec`] of pairs.
//!
//! Maps of [`Value`](crate::Value) keys cannot be hashed or ordered, so lookups are
//! linear. Encoding writes entries in insertion order and decoding restores that order.
//!
//! # Example
//!
//! ```
//! use deed::prelude::*;
//!
//! let mut meta = VecMap::new();
//! meta.insert(Value::from("line"), Value::from(12));
//! meta.insert(Value::from("file"), Value::from("core.clj"));
//!
//! assert_eq!(meta.get(&Value::from("line")), Some(&Value::Int(12)));
//!
//! // from a vector of pairs, later duplicates win
//! let vm = VecMap::from(vec![(1, "a"), (2, "b"), (1, "c")]);
//! assert_eq!(vm.len(), 2);
//! assert_eq!(vm.get(&1), Some(&"c"));
//! ```

use std::{iter::FromIterator, slice::Iter, vec::IntoIter};

#[derive(PartialEq, Clone, Debug)]
/// A map implemented as a [`Vec`] of pairs, in insertion order.
///
/// See also: [module level documentation](`crate::vecmap`).
pub struct VecMap<K: PartialEq, V>(Vec<(K, V)>);

impl<K: PartialEq, V> Default for VecMap<K, V> {
    fn default() -> Self { VecMap(Vec::new()) }
}

impl<K: PartialEq, V> VecMap<K, V> {
    /// Creates an empty map.
    pub fn new() -> Self { Self::default() }

    /// Creates an empty map with room for `cap` entries.
    pub fn with_capacity(cap: usize) -> Self { VecMap(Vec::with_capacity(cap)) }

    /// Inserts an entry, returning the previous value for `key` if there was one.
    ///
    /// Replacing a value keeps the key's original position.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => Some(std::mem::replace(v, value)),
            None => {
                self.0.push((key, value));
                None
            }
        }
    }

    /// Appends an entry without checking for an existing key.
    pub(crate) fn push(&mut self, key: K, value: V) { self.0.push((key, value)) }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &K) -> bool { self.get(key).is_some() }

    /// Removes `key`, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let idx = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(idx).1)
    }

    /// Number of entries.
    pub fn len(&self) -> usize { self.0.len() }

    /// Does the map contain no entries?
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Entries in insertion order.
    pub fn iter(&self) -> Iter<(K, V)> { self.0.iter() }

    pub fn keys(&self) -> impl Iterator<Item = &K> { self.0.iter().map(|(k, _)| k) }

    pub fn values(&self) -> impl Iterator<Item = &V> { self.0.iter().map(|(_, v)| v) }
}

impl<K: PartialEq, V> From<Vec<(K, V)>> for VecMap<K, V> {
    fn from(v: Vec<(K, V)>) -> Self { Self::from_iter(v) }
}

impl<K: PartialEq, V> IntoIterator for VecMap<K, V> {
    type IntoIter = IntoIter<(K, V)>;
    type Item = (K, V);

    fn into_iter(self) -> IntoIter<(K, V)> { self.0.into_iter() }
}

impl<'a, K: PartialEq, V> IntoIterator for &'a VecMap<K, V> {
    type IntoIter = Iter<'a, (K, V)>;
    type Item = &'a (K, V);

    fn into_iter(self) -> Iter<'a, (K, V)> { self.0.iter() }
}

impl<K: PartialEq, V> FromIterator<(K, V)> for VecMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> VecMap<K, V> {
        let mut out = VecMap::new();
        for (k, v) in iter {
            out.insert(k, v);
        }
        out
    }
}
