//! Hash collections used across SheetKit.
//!
//! Defaults to `rustc-hash`; enable the `std-hash` feature to fall back to the
//! SipHash maps from the standard library.

#[cfg(feature = "std-hash")]
pub mod map {
    pub use std::collections::hash_map::Entry;
    pub use std::collections::{HashMap, HashSet};

    /// Creates an empty map with the configured hasher.
    pub fn new<K, V>() -> HashMap<K, V> {
        HashMap::new()
    }
}

#[cfg(not(feature = "std-hash"))]
pub mod map {
    pub use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
    pub use std::collections::hash_map::Entry;

    /// Creates an empty map with the configured hasher.
    pub fn new<K, V>() -> HashMap<K, V> {
        HashMap::default()
    }
}
