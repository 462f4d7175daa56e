use serde::{Deserialize, Serialize};

/// List-view projection of a pokemon - the star of the grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: u32,
    pub name: String,
    pub sprite: Option<String>,
    pub types: Vec<String>,
}

/// Full single-pokemon projection for detail views.
///
/// Immutable once mapped; a refresh produces a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detail {
    pub card: Card,
    /// Decimetres, as the catalog reports it
    pub height: u32,
    /// Hectograms, as the catalog reports it
    pub weight: u32,
    pub abilities: Vec<String>,
    pub stats: Vec<StatEntry>,
    pub moves: Vec<String>,
}

/// One base stat with its display label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatEntry {
    pub label: String,
    pub value: i32,
}

/// Search parameters with all the bells and whistles
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    /// 1-based
    pub page: usize,
    pub page_size: usize,
    /// Elemental type filters; multiple types intersect
    pub types: Vec<String>,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: 1,
            page_size: 24, // matches the grid the frontend renders
            types: Vec::new(),
        }
    }
}

/// What a search produced.
///
/// Always well-formed: a failed search is an empty page with the failure
/// in `error`, never a panic or an Err for the caller to unwrap.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    pub items: Vec<Card>,
    pub total: usize,
    pub error: Option<String>,
}
