// API client implementations for the remote catalog and the internal list API
pub mod lists;
pub mod pokeapi;

// Re-export common types
pub use lists::{ApiErrorCode, ListApiClient, ListApiError, ListKind, ListRecord, NewListEntry};
pub use pokeapi::{NamedResource, PokeApiClient, PokeApiError, Pokemon, PokemonPage};
