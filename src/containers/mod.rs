//! Ordered container types
//!
//! - **`OrderedMap<K, V, S>`** - Hash map that iterates in insertion order,
//!   with in-place key renaming and positional insert
//! - **`SnapshotIter<V>`** - Forward-only cursor over a copy of a map's values
//!
//! ## Design Principles
//!
//! - Absence and conflicts are reported through `Option`/`bool`, never panics
//! - Compound operations are all-or-nothing
//! - Iteration never borrows the container it was produced from

mod ordered_map;
mod snapshot_iter;

pub use ordered_map::{IntoIter, Iter, OrderedMap, OrderedMapStats, Placement};
pub use snapshot_iter::{Cursor, CursorState, SnapshotIter};
