//! OrderedMap: hash map that remembers key insertion order
//!
//! Keys live in two places: a hash table that owns the values, and a `Vec`
//! that records their order. Every mutation updates both, so the two always
//! hold the same key set and a key appears at most once in the sequence.
//!
//! # Complexity
//!
//! - `set` of a new key, `get`, `exists`, update of an existing key: O(1)
//! - `delete`, `index_of`, `replace_key`, `set_before`, `set_after`: O(n),
//!   dominated by the scan or the shift of the key sequence
//! - `values`, `snapshot`: O(n)

use crate::config::{Config, OrderedMapConfig};
use crate::containers::snapshot_iter::SnapshotIter;
use crate::error::{check_bounds, OrderedMapError, Result};
use std::borrow::Borrow;
use std::collections::hash_map::{self, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::iter::FusedIterator;
use std::ops::Index;

/// Capacity below which auto-shrink never triggers
const SHRINK_MIN_CAPACITY: usize = 64;

/// Side of an existing key on which a positional insert lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Immediately before the existing key
    Before,
    /// Immediately after the existing key
    After,
}

impl Placement {
    #[inline]
    fn offset(self) -> usize {
        match self {
            Placement::Before => 0,
            Placement::After => 1,
        }
    }
}

/// Hash map that iterates in insertion order and supports positional insert
///
/// New keys are appended to the order; overwriting an existing key keeps its
/// position. Keys can be renamed in place with [`replace_key`] and new
/// entries can be spliced next to an existing key with [`set_before`] and
/// [`set_after`].
///
/// Absence and conflicts are never errors: lookups return `Option`, compound
/// operations return `bool`/`Option` and leave the map untouched when they
/// fail. The `try_*` variants report the same failures as
/// [`OrderedMapError`] for `?` propagation.
///
/// # Examples
///
/// ```rust
/// use ordmap::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.set("a", 1);
/// map.set("b", 2);
/// map.set("c", 3);
///
/// assert_eq!(map.set_before(&"b", "x", 9), Some(1));
/// assert_eq!(map.keys(), &["a", "x", "b", "c"]);
///
/// assert_eq!(map.delete(&"x"), Some(9));
/// assert!(map.replace_key(&"a", "z"));
/// assert_eq!(map.keys(), &["z", "b", "c"]);
/// assert_eq!(map.get(&"z"), Some(&1));
/// ```
///
/// [`replace_key`]: OrderedMap::replace_key
/// [`set_before`]: OrderedMap::set_before
/// [`set_after`]: OrderedMap::set_after
#[derive(Clone)]
pub struct OrderedMap<K, V, S = ahash::RandomState> {
    /// Keys in iteration order, no duplicates
    order: Vec<K>,
    /// Owner of the values, same key set as `order`
    table: HashMap<K, V, S>,
    /// Release spare capacity after deletes
    auto_shrink: bool,
}

/// Snapshot of the map's size and configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedMapStats {
    /// Number of entries
    pub len: usize,
    /// Capacity of the lookup table
    pub capacity: usize,
    /// Capacity of the key sequence
    pub key_capacity: usize,
    /// Whether deletes may shrink the map
    pub auto_shrink: bool,
}

impl<K, V> OrderedMap<K, V, ahash::RandomState> {
    /// Creates an empty map with the default hasher
    pub fn new() -> Self {
        Self::with_hasher(ahash::RandomState::new())
    }

    /// Creates an empty map with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, ahash::RandomState::new())
    }

    /// Creates an empty map from a validated configuration
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordmap::{OrderedMap, OrderedMapConfig};
    ///
    /// let config = OrderedMapConfig::builder().initial_capacity(128).build()?;
    /// let map: OrderedMap<u32, String> = OrderedMap::with_config(&config)?;
    /// assert!(map.capacity() >= 128);
    /// # Ok::<(), ordmap::OrderedMapError>(())
    /// ```
    pub fn with_config(config: &OrderedMapConfig) -> Result<Self> {
        config.validate()?;
        log::debug!(
            "Creating ordered map with initial_capacity={}, auto_shrink={}",
            config.initial_capacity,
            config.auto_shrink
        );
        let mut map = Self::with_capacity(config.initial_capacity);
        map.auto_shrink = config.auto_shrink;
        Ok(map)
    }
}

impl<K, V, S> OrderedMap<K, V, S> {
    /// Creates an empty map that hashes keys with `hash_builder`
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            order: Vec::new(),
            table: HashMap::with_hasher(hash_builder),
            auto_shrink: false,
        }
    }

    /// Creates an empty map with room for `capacity` entries and a custom hasher
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            order: Vec::with_capacity(capacity),
            table: HashMap::with_capacity_and_hasher(capacity, hash_builder),
            auto_shrink: false,
        }
    }

    /// Returns the number of entries
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if the map holds no entries
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the keys in order as a read-only view
    #[inline]
    pub fn keys(&self) -> &[K] {
        &self.order
    }

    /// Returns the key at `index` in the order
    #[inline]
    pub fn key_at(&self, index: usize) -> Option<&K> {
        self.order.get(index)
    }

    /// Returns the number of entries the lookup table holds without reallocating
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Enables or disables shrinking after deletes
    pub fn set_auto_shrink(&mut self, enabled: bool) {
        self.auto_shrink = enabled;
    }

    /// Removes all entries, keeping the allocated capacity
    pub fn clear(&mut self) {
        self.order.clear();
        self.table.clear();
    }

    /// Returns a reference to the map's hasher
    pub fn hasher(&self) -> &S {
        self.table.hasher()
    }

    /// Returns size and configuration details
    pub fn statistics(&self) -> OrderedMapStats {
        OrderedMapStats {
            len: self.len(),
            capacity: self.table.capacity(),
            key_capacity: self.order.capacity(),
            auto_shrink: self.auto_shrink,
        }
    }
}

impl<K, V, S> OrderedMap<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    /// Inserts or updates an entry, returning the previous value
    ///
    /// A new key is appended to the end of the order. Updating an existing
    /// key replaces the value and leaves its position unchanged.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        match self.table.entry(key) {
            hash_map::Entry::Occupied(mut entry) => Some(entry.insert(value)),
            hash_map::Entry::Vacant(entry) => {
                self.order.push(entry.key().clone());
                entry.insert(value);
                None
            }
        }
    }

    /// Returns a reference to the value stored under `key`
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.get(key)
    }

    /// Returns a mutable reference to the value stored under `key`
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.get_mut(key)
    }

    /// Returns the entry at `index` in the order
    pub fn get_index(&self, index: usize) -> Option<(&K, &V)> {
        let key = self.order.get(index)?;
        self.table.get(key).map(|value| (key, value))
    }

    /// [`get_index`](OrderedMap::get_index) reporting an out-of-range index
    pub fn try_get_index(&self, index: usize) -> Result<(&K, &V)> {
        check_bounds(index, self.len())?;
        self.get_index(index)
            .ok_or_else(|| OrderedMapError::out_of_bounds(index, self.len()))
    }

    /// Removes `key` from the table and from the order, returning its value
    ///
    /// Removing from the order is a linear scan plus a shift, O(n).
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let value = self.table.remove(key)?;
        if let Some(pos) = self.position_of(key) {
            self.order.remove(pos);
        }
        self.shrink_if_sparse();
        Some(value)
    }

    /// Returns true if `key` is present. O(1).
    #[inline]
    pub fn exists<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.contains_key(key)
    }

    /// Alias of [`exists`](OrderedMap::exists) matching the std collections
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.exists(key)
    }

    /// Returns the position of `key` in the order, or `None` if absent
    ///
    /// This scans the key sequence, O(n).
    pub fn index_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if !self.table.contains_key(key) {
            return None;
        }
        self.position_of(key)
    }

    /// Returns an owned copy of the keys in order
    pub fn to_keys(&self) -> Vec<K> {
        self.order.clone()
    }

    /// Returns clones of the values in order. O(n).
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.iter_values().cloned().collect()
    }

    /// Returns an iterator over `(key, value)` pairs in order
    pub fn iter(&self) -> Iter<'_, K, V, S> {
        Iter {
            keys: self.order.iter(),
            table: &self.table,
        }
    }

    /// Returns an iterator over the values in order
    pub fn iter_values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator + '_ {
        self.iter().map(|(_, value)| value)
    }

    /// Renames `old` to `new`, keeping its value and its position
    ///
    /// Returns false, leaving the map unchanged, when `old` is absent or `new`
    /// is already present. Renaming a key to itself therefore fails.
    pub fn replace_key<Q>(&mut self, old: &Q, new: K) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if !self.table.contains_key(old) || self.table.contains_key::<K>(&new) {
            return false;
        }
        let Some(pos) = self.position_of(old) else {
            return false;
        };
        let Some(value) = self.table.remove(old) else {
            return false;
        };
        self.table.insert(new.clone(), value);
        self.order[pos] = new;
        log::trace!("Renamed key at position {}", pos);
        true
    }

    /// Inserts `new -> value` immediately before `present`
    ///
    /// Returns the index of the new entry, or `None` when `present` is absent
    /// or `new` already exists. Later keys shift one slot right, O(n).
    pub fn set_before<Q>(&mut self, present: &Q, new: K, value: V) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.set_at(present, new, value, Placement::Before)
    }

    /// Inserts `new -> value` immediately after `present`
    ///
    /// Same contract as [`set_before`](OrderedMap::set_before).
    pub fn set_after<Q>(&mut self, present: &Q, new: K, value: V) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.set_at(present, new, value, Placement::After)
    }

    /// Positional insert shared by [`set_before`](OrderedMap::set_before) and
    /// [`set_after`](OrderedMap::set_after)
    pub fn set_at<Q>(
        &mut self,
        present: &Q,
        new: K,
        value: V,
        placement: Placement,
    ) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if !self.table.contains_key(present) || self.table.contains_key::<K>(&new) {
            return None;
        }
        let index = self.position_of(present)? + placement.offset();
        self.order.insert(index, new.clone());
        self.table.insert(new, value);
        log::trace!(
            "Inserted key at position {} ({:?}), len={}",
            index,
            placement,
            self.order.len()
        );
        Some(index)
    }

    /// Builds a snapshot cursor over the current values in order
    ///
    /// The cursor owns its copy; later mutations of the map are not visible
    /// through it.
    pub fn snapshot(&self) -> SnapshotIter<V>
    where
        V: Clone,
    {
        SnapshotIter::new(self.values())
    }

    /// Reserves capacity for at least `additional` more entries
    pub fn reserve(&mut self, additional: usize) {
        self.order.reserve(additional);
        self.table.reserve(additional);
    }

    /// Shrinks both the key sequence and the table as much as possible
    pub fn shrink_to_fit(&mut self) {
        self.order.shrink_to_fit();
        self.table.shrink_to_fit();
    }

    fn shrink_if_sparse(&mut self) {
        let capacity = self.table.capacity();
        if self.auto_shrink && capacity >= SHRINK_MIN_CAPACITY && self.len() < capacity / 4 {
            log::trace!("Shrinking ordered map: len={}, capacity={}", self.len(), capacity);
            self.shrink_to_fit();
        }
    }

    fn position_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.order.iter().position(|k| Borrow::<Q>::borrow(k) == key)
    }
}

impl<K, V, S> OrderedMap<K, V, S>
where
    K: Hash + Eq + Clone + fmt::Debug,
    S: BuildHasher,
{
    /// [`replace_key`](OrderedMap::replace_key) reporting the failure reason
    pub fn try_replace_key<Q>(&mut self, old: &Q, new: K) -> Result<()>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized,
    {
        self.check_positional(old, &new)?;
        if self.replace_key(old, new) {
            Ok(())
        } else {
            Err(OrderedMapError::key_not_found(old))
        }
    }

    /// [`set_before`](OrderedMap::set_before) reporting the failure reason
    pub fn try_set_before<Q>(&mut self, present: &Q, new: K, value: V) -> Result<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized,
    {
        self.try_set_at(present, new, value, Placement::Before)
    }

    /// [`set_after`](OrderedMap::set_after) reporting the failure reason
    pub fn try_set_after<Q>(&mut self, present: &Q, new: K, value: V) -> Result<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized,
    {
        self.try_set_at(present, new, value, Placement::After)
    }

    fn try_set_at<Q>(
        &mut self,
        present: &Q,
        new: K,
        value: V,
        placement: Placement,
    ) -> Result<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized,
    {
        self.check_positional(present, &new)?;
        self.set_at(present, new, value, placement)
            .ok_or_else(|| OrderedMapError::key_not_found(present))
    }

    fn check_positional<Q>(&self, present: &Q, new: &K) -> Result<()>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized,
    {
        if !self.table.contains_key(present) {
            return Err(OrderedMapError::key_not_found(present));
        }
        if self.table.contains_key::<K>(new) {
            return Err(OrderedMapError::key_exists(new));
        }
        Ok(())
    }
}

/// Borrowing iterator over the entries of an [`OrderedMap`] in order
pub struct Iter<'a, K, V, S> {
    keys: std::slice::Iter<'a, K>,
    table: &'a HashMap<K, V, S>,
}

impl<'a, K, V, S> Iterator for Iter<'a, K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.keys.next()?;
        self.table.get(key).map(|value| (key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<'a, K, V, S> DoubleEndedIterator for Iter<'a, K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        let key = self.keys.next_back()?;
        self.table.get(key).map(|value| (key, value))
    }
}

impl<'a, K, V, S> ExactSizeIterator for Iter<'a, K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
}

impl<'a, K, V, S> FusedIterator for Iter<'a, K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
}

/// Owning iterator over the entries of an [`OrderedMap`] in order
pub struct IntoIter<K, V, S> {
    keys: std::vec::IntoIter<K>,
    table: HashMap<K, V, S>,
}

impl<K, V, S> Iterator for IntoIter<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.keys.next()?;
        let value = self.table.remove(&key)?;
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<K, V, S> ExactSizeIterator for IntoIter<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
}

impl<K, V, S> IntoIterator for OrderedMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type Item = (K, V);
    type IntoIter = IntoIter<K, V, S>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            keys: self.order.into_iter(),
            table: self.table,
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a OrderedMap<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S: Default> Default for OrderedMap<K, V, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> fmt::Debug for OrderedMap<K, V, S>
where
    K: Hash + Eq + Clone + fmt::Debug,
    V: fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Two maps are equal when they hold the same entries in the same order
impl<K, V, S> PartialEq for OrderedMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K, V, S> Eq for OrderedMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Eq,
    S: BuildHasher,
{
}

/// Panics when `key` is absent, like `std::collections::HashMap`
impl<K, Q, V, S> Index<&Q> for OrderedMap<K, V, S>
where
    K: Hash + Eq + Clone + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
    S: BuildHasher,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("key not present in OrderedMap")
    }
}

impl<K, V, S> FromIterator<(K, V)> for OrderedMap<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K, V, S> Extend<(K, V)> for OrderedMap<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> OrderedMap<&'static str, i32> {
        let mut map = OrderedMap::new();
        map.set("a", 1);
        map.set("b", 2);
        map.set("c", 3);
        map
    }

    /// Every key in the order is in the table and vice versa
    fn assert_consistent<K, V, S>(map: &OrderedMap<K, V, S>)
    where
        K: Hash + Eq + Clone + fmt::Debug,
        S: BuildHasher,
    {
        assert_eq!(map.order.len(), map.table.len());
        for key in &map.order {
            assert!(map.table.contains_key(key), "{:?} missing from table", key);
        }
        let mut seen = std::collections::HashSet::new();
        for key in &map.order {
            assert!(seen.insert(key), "{:?} duplicated in order", key);
        }
    }

    #[test]
    fn test_basic_operations() {
        let mut map = OrderedMap::new();
        assert!(map.is_empty());

        assert_eq!(map.set("key1", 42), None);
        assert_eq!(map.set("key2", 43), None);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&"key1"), Some(&42));
        assert_eq!(map.get(&"key3"), None);
        assert!(map.exists(&"key2"));
        assert!(!map.contains_key(&"key3"));
        assert_consistent(&map);
    }

    #[test]
    fn test_update_keeps_position() {
        let mut map = abc();
        assert_eq!(map.set("a", 10), Some(1));
        assert_eq!(map.get(&"a"), Some(&10));
        assert_eq!(map.index_of(&"a"), Some(0));
        assert_eq!(map.keys(), &["a", "b", "c"]);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_delete_removes_from_order() {
        let mut map = abc();
        assert_eq!(map.delete(&"b"), Some(2));
        assert_eq!(map.keys(), &["a", "c"]);
        assert!(!map.exists(&"b"));
        assert_eq!(map.index_of(&"b"), None);
        assert_eq!(map.delete(&"b"), None);
        assert_consistent(&map);
    }

    #[test]
    fn test_empty_map_edge_cases() {
        let mut map: OrderedMap<String, i32> = OrderedMap::new();
        assert_eq!(map.index_of("a"), None);
        assert_eq!(map.get("a"), None);
        assert_eq!(map.delete("a"), None);
        assert!(!map.exists("a"));
        assert_eq!(map.set_before("a", "b".to_string(), 1), None);
        assert_eq!(map.set_after("a", "b".to_string(), 1), None);
        assert!(!map.replace_key("a", "b".to_string()));
        assert!(map.is_empty());
        assert!(map.snapshot().get_next().is_none());
    }

    #[test]
    fn test_documented_scenario() {
        let mut map = abc();
        assert_eq!(map.keys(), &["a", "b", "c"]);

        assert_eq!(map.set_before(&"b", "x", 9), Some(1));
        assert_eq!(map.keys(), &["a", "x", "b", "c"]);

        assert_eq!(map.delete(&"x"), Some(9));
        assert_eq!(map.keys(), &["a", "b", "c"]);

        assert!(map.replace_key(&"a", "z"));
        assert_eq!(map.keys(), &["z", "b", "c"]);
        assert_eq!(map.get(&"z"), Some(&1));
        assert_consistent(&map);
    }

    #[test]
    fn test_set_after() {
        let mut map = abc();
        assert_eq!(map.set_after(&"c", "d", 4), Some(3));
        assert_eq!(map.set_after(&"a", "y", 7), Some(1));
        assert_eq!(map.keys(), &["a", "y", "b", "c", "d"]);
        assert_eq!(map.values(), vec![1, 7, 2, 3, 4]);
        assert_consistent(&map);
    }

    #[test]
    fn test_set_before_first() {
        let mut map = abc();
        assert_eq!(map.set_before(&"a", "first", 0), Some(0));
        assert_eq!(map.keys(), &["first", "a", "b", "c"]);
    }

    #[test]
    fn test_positional_conflicts_leave_map_unchanged() {
        let mut map = abc();
        let before = map.clone();

        assert_eq!(map.set_before(&"missing", "x", 9), None);
        assert_eq!(map.set_after(&"b", "c", 9), None);
        assert_eq!(map.set_before(&"b", "b", 9), None);
        assert_eq!(map, before);
        assert_eq!(map.get(&"c"), Some(&3));
    }

    #[test]
    fn test_replace_key_failures() {
        let mut map = abc();
        let before = map.clone();

        assert!(!map.replace_key(&"missing", "q"));
        assert!(!map.replace_key(&"a", "b"));
        assert!(!map.replace_key(&"a", "a"));
        assert_eq!(map, before);
    }

    #[test]
    fn test_replace_key_preserves_position() {
        let mut map = abc();
        assert!(map.replace_key(&"b", "beta"));
        assert_eq!(map.index_of(&"beta"), Some(1));
        assert_eq!(map.get(&"beta"), Some(&2));
        assert!(!map.exists(&"b"));
        assert_consistent(&map);
    }

    #[test]
    fn test_borrowed_lookups() {
        let mut map: OrderedMap<String, usize> = OrderedMap::new();
        map.set("one".to_string(), 1);
        map.set("two".to_string(), 2);

        assert_eq!(map.get("two"), Some(&2));
        assert_eq!(map.index_of("two"), Some(1));
        assert_eq!(map.set_after("one", "one-and-a-half".to_string(), 15), Some(1));
        assert!(map.replace_key("two", "deux".to_string()));
        assert_eq!(map["deux"], 2);
        assert_eq!(map.delete("one"), Some(1));
        assert_eq!(map.to_keys(), vec!["one-and-a-half".to_string(), "deux".to_string()]);
    }

    #[test]
    fn test_try_variants() {
        let mut map = abc();

        let err = map.try_set_before(&"nope", "x", 1).unwrap_err();
        assert_eq!(err.category(), "absence");
        assert!(err.to_string().contains("\"nope\""));

        let err = map.try_set_after(&"a", "b", 1).unwrap_err();
        assert_eq!(err.category(), "conflict");

        let err = map.try_replace_key(&"a", "a").unwrap_err();
        assert!(matches!(err, OrderedMapError::KeyExists { .. }));

        assert_eq!(map.try_set_after(&"a", "x", 8).unwrap(), 1);
        map.try_replace_key(&"x", "y").unwrap();
        assert_eq!(map.keys(), &["a", "y", "b", "c"]);
    }

    #[test]
    fn test_get_index_and_key_at() {
        let map = abc();
        assert_eq!(map.get_index(1), Some((&"b", &2)));
        assert_eq!(map.get_index(3), None);
        assert_eq!(map.key_at(2), Some(&"c"));
        assert_eq!(map.key_at(9), None);
    }

    #[test]
    fn test_get_mut() {
        let mut map = abc();
        if let Some(value) = map.get_mut(&"c") {
            *value *= 10;
        }
        assert_eq!(map.get(&"c"), Some(&30));
        assert!(map.get_mut(&"z").is_none());
    }

    #[test]
    fn test_iterators_follow_order() {
        let mut map = abc();
        map.set_before(&"a", "zero", 0);

        let pairs: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(pairs, vec![("zero", 0), ("a", 1), ("b", 2), ("c", 3)]);

        let reversed: Vec<_> = map.iter_values().rev().copied().collect();
        assert_eq!(reversed, vec![3, 2, 1, 0]);
        assert_eq!(map.iter().len(), 4);

        let owned: Vec<_> = map.into_iter().collect();
        assert_eq!(owned, vec![("zero", 0), ("a", 1), ("b", 2), ("c", 3)]);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut map = abc();
        let mut cursor = map.snapshot();
        map.set("d", 4);
        map.delete(&"a");

        let drained: Vec<_> = std::iter::from_fn(|| cursor.get_next().copied()).collect();
        assert_eq!(drained, vec![1, 2, 3]);
        assert_eq!(map.snapshot().into_values(), vec![2, 3, 4]);
    }

    #[test]
    fn test_snapshot_length_matches_map() {
        let map = abc();
        let cursor = map.snapshot();
        assert_eq!(cursor.snapshot_len(), map.len());
    }

    #[test]
    fn test_from_iterator_and_extend() {
        let mut map: OrderedMap<&str, i32> =
            vec![("x", 1), ("y", 2), ("x", 3)].into_iter().collect();
        assert_eq!(map.keys(), &["x", "y"]);
        assert_eq!(map.get(&"x"), Some(&3));

        map.extend(vec![("z", 4), ("y", 5)]);
        assert_eq!(map.keys(), &["x", "y", "z"]);
        assert_eq!(map.values(), vec![3, 5, 4]);
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let forward: OrderedMap<i32, i32> = (0..4).map(|i| (i, i)).collect();
        let backward: OrderedMap<i32, i32> = (0..4).rev().map(|i| (i, i)).collect();
        assert_ne!(forward, backward);
        assert_eq!(forward, forward.clone());
    }

    #[test]
    fn test_debug_format() {
        let map = abc();
        assert_eq!(format!("{:?}", map), r#"{"a": 1, "b": 2, "c": 3}"#);
    }

    #[test]
    #[should_panic(expected = "key not present")]
    fn test_index_panics_on_missing_key() {
        let map = abc();
        let _ = map[&"missing"];
    }

    #[test]
    fn test_clear_and_reuse() {
        let mut map = abc();
        map.clear();
        assert!(map.is_empty());
        assert!(map.keys().is_empty());
        map.set("b", 20);
        assert_eq!(map.keys(), &["b"]);
        assert_consistent(&map);
    }

    #[test]
    fn test_with_config() {
        let config = OrderedMapConfig::builder()
            .initial_capacity(256)
            .auto_shrink(true)
            .build()
            .unwrap();
        let map: OrderedMap<u32, u32> = OrderedMap::with_config(&config).unwrap();
        let stats = map.statistics();
        assert!(stats.capacity >= 256);
        assert!(stats.key_capacity >= 256);
        assert!(stats.auto_shrink);
        assert_eq!(stats.len, 0);
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let config = OrderedMapConfig {
            initial_capacity: usize::MAX,
            auto_shrink: false,
        };
        assert!(OrderedMap::<u32, u32>::with_config(&config).is_err());
    }

    /// Fills 1000 entries into a 1024-slot map, then deletes all but the last 10
    fn fill_then_drain(auto_shrink: bool) -> (OrderedMap<i32, i32>, usize) {
        let mut map = OrderedMap::with_capacity(1024);
        map.set_auto_shrink(auto_shrink);
        for i in 0..1000 {
            map.set(i, i);
        }
        let key_capacity = map.statistics().key_capacity;
        for i in 0..990 {
            map.delete(&i);
        }
        (map, key_capacity)
    }

    // The key sequence only gives capacity back through shrink_to_fit; the hash
    // table's capacity() also drops as deletes leave tombstones, so it cannot
    // tell a shrink apart from ordinary deletes.
    #[test]
    fn test_auto_shrink_after_deletes() {
        let (map, grown) = fill_then_drain(true);
        assert!(grown >= 1024);
        assert!(map.statistics().key_capacity < grown);
        assert!(map.statistics().key_capacity < 1024);
        assert_eq!(map.keys(), (990..1000).collect::<Vec<_>>().as_slice());
        assert_consistent(&map);
    }

    #[test]
    fn test_no_shrink_by_default() {
        let (map, grown) = fill_then_drain(false);
        assert!(grown >= 1024);
        assert_eq!(map.statistics().key_capacity, grown);
        assert_eq!(map.len(), 10);
        assert_consistent(&map);
    }

    #[test]
    fn test_conflict_checks_with_borrowed_keys() {
        let mut map: OrderedMap<String, i32> = OrderedMap::new();
        map.set("one".to_string(), 1);
        map.set("two".to_string(), 2);
        let before = map.clone();

        // Lookup through &str, conflict check through the owned String
        assert!(!map.replace_key("one", "two".to_string()));
        assert!(!map.replace_key("one", "one".to_string()));
        assert_eq!(map.set_before("two", "one".to_string(), 9), None);
        assert_eq!(map.set_after("one", "two".to_string(), 9), None);
        assert!(matches!(
            map.try_set_after("one", "two".to_string(), 9),
            Err(OrderedMapError::KeyExists { .. })
        ));
        assert_eq!(map, before);

        assert_eq!(map.set_after("one", "three".to_string(), 3), Some(1));
        assert!(map.replace_key("two", "deux".to_string()));
        assert_eq!(map.keys(), &["one", "three", "deux"]);
        assert_consistent(&map);
    }

    #[test]
    fn test_try_get_index() {
        let map = abc();
        assert_eq!(map.try_get_index(2).unwrap(), (&"c", &3));
        let err = map.try_get_index(3).unwrap_err();
        assert!(matches!(err, OrderedMapError::OutOfBounds { index: 3, size: 3 }));
        assert_eq!(err.category(), "bounds");
    }

    #[test]
    fn test_custom_hasher() {
        let mut map: OrderedMap<u8, u8, std::collections::hash_map::RandomState> =
            OrderedMap::default();
        map.set(2, 20);
        map.set(1, 10);
        assert_eq!(map.keys(), &[2, 1]);
        let _ = map.hasher();
    }
}
