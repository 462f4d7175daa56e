// Core business logic lives here - the brain of the operation
pub mod config;
pub mod detail;
pub mod error;
pub mod mapper;
pub mod models;
pub mod providers;
pub mod roster;
pub mod search;
pub mod store;

pub use config::Config;
pub use detail::{DetailLoader, DetailState};
pub use error::Error;
pub use models::{Card, Detail, SearchOutcome, SearchRequest, StatEntry};
pub use providers::PokeApiProvider;
pub use roster::{ActionOutcome, ListAction, Roster};
pub use search::{CatalogSource, SearchEngine};
pub use store::CacheStore;

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
pub(crate) mod testutil;
