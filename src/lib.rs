//! # ordmap: Insertion-Ordered Hash Map
//!
//! This crate provides a hash map that keeps its keys in insertion order while
//! offering O(1) lookups, plus a snapshot cursor for restartable iteration.
//!
//! ## Key Features
//!
//! - **Stable order**: new keys append, updates keep their position
//! - **Repositioning**: insert next to an existing key, rename keys in place
//! - **Snapshot cursors**: iterate over a copy that later writes never touch
//! - **Configuration**: presets, environment variables and JSON files
//!
//! ## Quick Start
//!
//! ```rust
//! use ordmap::OrderedMap;
//!
//! let mut map = OrderedMap::new();
//! map.set("a", 1);
//! map.set("b", 2);
//! map.set("c", 3);
//!
//! // Splice a new entry in front of "b"
//! assert_eq!(map.set_before(&"b", "x", 9), Some(1));
//! assert_eq!(map.keys(), &["a", "x", "b", "c"]);
//!
//! // Walk a snapshot of the values
//! let mut cursor = map.snapshot();
//! while let Some(value) = cursor.get_next() {
//!     println!("{}", value);
//! }
//! assert_eq!(cursor.current(), Some(&3));
//! ```
//!
//! ## Thread Safety
//!
//! Containers perform no internal synchronization. Share them across threads
//! behind a lock of your choice.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod containers;
pub mod error;

// Re-export core types
pub use config::{Config, OrderedMapConfig};
pub use containers::{Cursor, CursorState, OrderedMap, OrderedMapStats, Placement, SnapshotIter};
pub use error::{OrderedMapError, Result};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library (currently only logs the version)
pub fn init() {
    log::debug!("Initializing ordmap v{}", VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_functionality() {
        init();
        let mut map = OrderedMap::new();
        map.set(1u8, "one");
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_version_info() {
        assert!(!VERSION.is_empty());
        // Version should be semver format like "0.1.0"
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2);
    }
}
