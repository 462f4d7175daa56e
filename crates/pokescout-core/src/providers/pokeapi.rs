// PokeAPI provider - bridges the API client with the CatalogSource trait
use async_trait::async_trait;
use pokescout_api::{PokeApiClient, PokeApiError, Pokemon, PokemonPage};

use crate::{search::CatalogSource, Error, Result};

/// Wrapper around PokeApiClient that implements CatalogSource
pub struct PokeApiProvider {
    client: PokeApiClient,
}

impl PokeApiProvider {
    pub fn new(client: PokeApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogSource for PokeApiProvider {
    async fn fetch_exact(&self, key: &str) -> Result<Pokemon> {
        self.client.fetch_exact(key).await.map_err(into_error)
    }

    async fn fetch_page(&self, offset: u32, limit: u32) -> Result<PokemonPage> {
        self.client
            .fetch_page(offset, limit)
            .await
            .map_err(into_error)
    }

    async fn fetch_types(&self) -> Result<Vec<String>> {
        let types = self.client.fetch_types().await.map_err(into_error)?;
        Ok(types.into_iter().map(|t| t.name).collect())
    }

    async fn fetch_type_members(&self, type_name: &str) -> Result<Vec<String>> {
        let members = self
            .client
            .fetch_type_members(type_name)
            .await
            .map_err(into_error)?;
        Ok(members.into_iter().map(|m| m.name).collect())
    }
}

/// Convert client errors to our internal error model, keeping the
/// not-found distinction callers care about
fn into_error(err: PokeApiError) -> Error {
    match err {
        PokeApiError::NotFound(key) => Error::NotFound(key),
        other => Error::ApiError(other.to_string()),
    }
}
