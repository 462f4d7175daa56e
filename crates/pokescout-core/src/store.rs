use pokescout_cache::{KeyedSlot, Slot};

use crate::models::Detail;

/// Process-wide cache regions for the catalog data layer.
///
/// Four independent regions, each lazily filled on first demand and never
/// invalidated - acceptable because catalog entries are treated as
/// append-only and the mapped models are immutable. Construction is
/// explicit so tests and embedders pick the lifetime; there is no global.
///
/// The store never performs network I/O itself: SearchEngine and
/// DetailLoader supply the loaders and this type only holds the results.
pub struct CacheStore {
    /// Elemental type names, sentinel types filtered out, sorted
    pub types: Slot<Vec<String>>,
    /// The full ordered name universe from the catalog listing
    pub all_names: Slot<Vec<String>>,
    /// Type name -> ordered member names
    pub type_members: KeyedSlot<Vec<String>>,
    /// Lower-cased key -> mapped detail record
    pub details: KeyedSlot<Detail>,
}

impl CacheStore {
    pub fn new() -> Self {
        Self {
            types: Slot::new(),
            all_names: Slot::new(),
            type_members: KeyedSlot::new(),
            details: KeyedSlot::new(),
        }
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new()
    }
}
