//! Snapshot cursor over an ordered sequence of values
//!
//! [`SnapshotIter`] owns a copy of the values taken when it was created and
//! walks them forward exactly once. It keeps no reference to the container it
//! came from, so the container can be mutated freely while the cursor is alive.
//!
//! The cursor remembers the most recently visited element. That element stays
//! available after the cursor is exhausted; [`SnapshotIter::current`] only
//! returns `None` before the first successful advance.

use std::iter::FusedIterator;

/// Position of a cursor within its snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// No element visited yet and at least one remains
    NotStarted,
    /// At least one element visited and at least one remains
    InProgress,
    /// No elements remain. An empty snapshot starts here.
    Exhausted,
}

/// Forward-only pull protocol shared by cursors
pub trait Cursor {
    /// Element type yielded by the cursor
    type Item;

    /// Returns true if an unvisited element remains
    fn has_next(&self) -> bool;

    /// Visits the next element, returning whether the cursor moved
    fn advance(&mut self) -> bool;

    /// Visits the next element and returns it, or `None` when exhausted
    fn get_next(&mut self) -> Option<&Self::Item>;

    /// Returns the most recently visited element
    fn current(&self) -> Option<&Self::Item>;

    /// Returns the most recently visited element with its 0-based index
    fn current_with_index(&self) -> Option<(&Self::Item, usize)>;
}

/// Cursor over a point-in-time copy of a map's values
///
/// # Examples
///
/// ```rust
/// use ordmap::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.set("a", 1);
/// map.set("b", 2);
///
/// let mut cursor = map.snapshot();
/// map.set("c", 3); // not visible through `cursor`
///
/// assert_eq!(cursor.get_next(), Some(&1));
/// assert_eq!(cursor.get_next(), Some(&2));
/// assert_eq!(cursor.get_next(), None);
/// assert_eq!(cursor.current_with_index(), Some((&2, 1)));
/// ```
#[derive(Debug, Clone)]
pub struct SnapshotIter<V> {
    values: Vec<V>,
    /// Index of the next element to visit
    position: usize,
    /// Index of the last visited element
    current: Option<usize>,
}

impl<V> SnapshotIter<V> {
    /// Creates a cursor positioned before the first of `values`
    pub fn new(values: Vec<V>) -> Self {
        Self {
            values,
            position: 0,
            current: None,
        }
    }

    /// Returns true if an unvisited element remains
    #[inline]
    pub fn has_next(&self) -> bool {
        self.position < self.values.len()
    }

    /// Visits the next element, returning whether the cursor moved
    ///
    /// Once exhausted this keeps returning false and leaves the current
    /// element untouched.
    pub fn advance(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.current = Some(self.position);
        self.position += 1;
        true
    }

    /// Visits the next element and returns it
    pub fn get_next(&mut self) -> Option<&V> {
        if self.advance() {
            self.current()
        } else {
            None
        }
    }

    /// Returns the most recently visited element
    ///
    /// `None` before the first successful advance. After exhaustion this is
    /// still the last element of the snapshot.
    #[inline]
    pub fn current(&self) -> Option<&V> {
        self.current.and_then(|index| self.values.get(index))
    }

    /// Returns the most recently visited element and its index in the snapshot
    pub fn current_with_index(&self) -> Option<(&V, usize)> {
        let index = self.current?;
        self.values.get(index).map(|value| (value, index))
    }

    /// Number of elements captured in the snapshot
    #[inline]
    pub fn snapshot_len(&self) -> usize {
        self.values.len()
    }

    /// Number of elements not yet visited
    #[inline]
    pub fn remaining(&self) -> usize {
        self.values.len() - self.position
    }

    /// Returns true once every element has been visited
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        !self.has_next()
    }

    /// Returns where the cursor stands
    pub fn state(&self) -> CursorState {
        match (self.has_next(), self.current) {
            (false, _) => CursorState::Exhausted,
            (true, None) => CursorState::NotStarted,
            (true, Some(_)) => CursorState::InProgress,
        }
    }

    /// Returns the whole snapshot, visited or not
    pub fn as_slice(&self) -> &[V] {
        &self.values
    }

    /// Consumes the cursor, returning the snapshot
    pub fn into_values(self) -> Vec<V> {
        self.values
    }
}

impl<V> From<Vec<V>> for SnapshotIter<V> {
    fn from(values: Vec<V>) -> Self {
        Self::new(values)
    }
}

impl<V> Cursor for SnapshotIter<V> {
    type Item = V;

    fn has_next(&self) -> bool {
        SnapshotIter::has_next(self)
    }

    fn advance(&mut self) -> bool {
        SnapshotIter::advance(self)
    }

    fn get_next(&mut self) -> Option<&V> {
        SnapshotIter::get_next(self)
    }

    fn current(&self) -> Option<&V> {
        SnapshotIter::current(self)
    }

    fn current_with_index(&self) -> Option<(&V, usize)> {
        SnapshotIter::current_with_index(self)
    }
}

/// Std iteration advances the same cursor, yielding clones
impl<V: Clone> Iterator for SnapshotIter<V> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        self.get_next().cloned()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl<V: Clone> ExactSizeIterator for SnapshotIter<V> {}

impl<V: Clone> FusedIterator for SnapshotIter<V> {}
