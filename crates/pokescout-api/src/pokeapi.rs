use serde::{Deserialize, Serialize};
use thiserror::Error;

const POKEAPI_BASE: &str = "https://pokeapi.co/api/v2";

#[derive(Error, Debug)]
pub enum PokeApiError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Pokemon not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PokeApiError>;

/// Client for the public PokeAPI catalog.
///
/// This is the single door to the remote catalog - every outbound call the
/// data layer makes goes through here. Each method is one HTTP request with
/// no retry; callers own caching and failure policy.
pub struct PokeApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl PokeApiClient {
    pub fn new() -> Self {
        Self::with_base_url(POKEAPI_BASE.to_string())
    }

    /// For mirrors or testing with a custom API URL
    pub fn with_base_url(base_url: String) -> Self {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("PokeScout/0.1.0"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Self { client, base_url }
    }

    /// Fetch one pokemon by exact name or numeric id
    pub async fn fetch_exact(&self, key: &str) -> Result<Pokemon> {
        let key = key.to_lowercase();
        let url = format!("{}/pokemon/{}", self.base_url, key);

        let response = self.client.get(&url).send().await?;

        if response.status() == 404 {
            return Err(PokeApiError::NotFound(key));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PokeApiError::RequestFailed(format!(
                "Status {}: {}",
                status, body
            )));
        }

        let pokemon: Pokemon = response.json().await?;
        Ok(pokemon)
    }

    /// Fetch one page of the catalog listing
    pub async fn fetch_page(&self, offset: u32, limit: u32) -> Result<PokemonPage> {
        let url = format!("{}/pokemon", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("offset", offset.to_string()), ("limit", limit.to_string())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PokeApiError::RequestFailed(format!(
                "Status {}: {}",
                status, body
            )));
        }

        let page: PokemonPage = response.json().await?;
        Ok(page)
    }

    /// Fetch the list of elemental types
    pub async fn fetch_types(&self) -> Result<Vec<NamedResource>> {
        let url = format!("{}/type", self.base_url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PokeApiError::RequestFailed(format!(
                "Status {}: {}",
                status, body
            )));
        }

        let list: TypeListResponse = response.json().await?;
        Ok(list.results)
    }

    /// Fetch the members of one elemental type
    pub async fn fetch_type_members(&self, type_name: &str) -> Result<Vec<NamedResource>> {
        let type_name = type_name.to_lowercase();
        let url = format!("{}/type/{}", self.base_url, type_name);

        let response = self.client.get(&url).send().await?;

        if response.status() == 404 {
            return Err(PokeApiError::NotFound(type_name));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PokeApiError::RequestFailed(format!(
                "Status {}: {}",
                status, body
            )));
        }

        let detail: TypeDetailResponse = response.json().await?;
        Ok(detail.pokemon.into_iter().map(|m| m.pokemon).collect())
    }
}

impl Default for PokeApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// One page of `GET /pokemon?limit=&offset=`
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonPage {
    pub count: u32,
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

/// `{name, url}` reference used all over the PokeAPI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TypeListResponse {
    #[serde(default)]
    results: Vec<NamedResource>,
}

#[derive(Debug, Deserialize)]
struct TypeDetailResponse {
    #[serde(default)]
    pokemon: Vec<TypeMember>,
}

#[derive(Debug, Deserialize)]
struct TypeMember {
    pokemon: NamedResource,
}

/// Full pokemon record as the API returns it.
///
/// Collection and optional fields default when absent so older or partial
/// records deserialize instead of failing the whole page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    /// Decimetres
    #[serde(default)]
    pub height: u32,
    /// Hectograms
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    #[serde(default)]
    pub stats: Vec<StatSlot>,
    #[serde(default)]
    pub moves: Vec<MoveSlot>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: Option<OtherSprites>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OtherSprites {
    #[serde(default)]
    pub showdown: Option<SpriteSet>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpriteSet {
    #[serde(default)]
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub type_ref: NamedResource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedResource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatSlot {
    pub stat: NamedResource,
    pub base_stat: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveSlot {
    #[serde(rename = "move")]
    pub move_ref: NamedResource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = PokeApiClient::new();
        assert_eq!(client.base_url, POKEAPI_BASE);
    }

    #[test]
    fn test_client_with_custom_base() {
        let client = PokeApiClient::with_base_url("http://localhost:8080/v2".to_string());
        assert_eq!(client.base_url, "http://localhost:8080/v2");
    }

    #[test]
    fn test_pokemon_defaults_for_missing_fields() {
        // Sparse record: only id and name present
        let p: Pokemon = serde_json::from_str(r#"{"id": 25, "name": "pikachu"}"#).unwrap();
        assert_eq!(p.id, 25);
        assert_eq!(p.name, "pikachu");
        assert!(p.sprites.front_default.is_none());
        assert!(p.types.is_empty());
        assert_eq!(p.height, 0);
        assert_eq!(p.weight, 0);
        assert!(p.stats.is_empty());
        assert!(p.moves.is_empty());
    }

    #[test]
    fn test_type_detail_flattening_shape() {
        let raw = r#"{"pokemon": [{"pokemon": {"name": "charmander", "url": null}, "slot": 1}]}"#;
        let detail: TypeDetailResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(detail.pokemon.len(), 1);
        assert_eq!(detail.pokemon[0].pokemon.name, "charmander");
    }
}
