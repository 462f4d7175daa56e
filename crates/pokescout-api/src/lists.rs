// Client for the internal favorites/team list API.
// The backend owns validation and persistence; this side only speaks the
// list/add/remove contract and normalizes its error envelope.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ListApiError {
    #[error("{code}: {message}")]
    Rejected { code: ApiErrorCode, message: String },

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ListApiError>;

/// Machine-readable rejection codes the backend returns in `{error, code}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorCode {
    Validation,
    Duplicate,
    TeamFull,
    NotFound,
    InternalError,
    Other(String),
}

impl ApiErrorCode {
    pub fn parse(code: &str) -> Self {
        match code.to_uppercase().as_str() {
            "VALIDATION" => Self::Validation,
            "DUPLICATE" => Self::Duplicate,
            "TEAM_FULL" => Self::TeamFull,
            "NOT_FOUND" => Self::NotFound,
            "INTERNAL_ERROR" => Self::InternalError,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation => write!(f, "VALIDATION"),
            Self::Duplicate => write!(f, "DUPLICATE"),
            Self::TeamFull => write!(f, "TEAM_FULL"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::InternalError => write!(f, "INTERNAL_ERROR"),
            Self::Other(code) => write!(f, "{}", code),
        }
    }
}

/// Which user-curated list an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Favorites,
    /// Capped at 6 members server-side
    Team,
}

impl ListKind {
    fn path(&self) -> &'static str {
        match self {
            Self::Favorites => "favorites",
            Self::Team => "team",
        }
    }
}

/// Stored record as the backend returns it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListRecord {
    pub id: u64,
    pub pokemon_id: u32,
    pub name: String,
    #[serde(default)]
    pub sprite: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
}

/// Payload for adding an entry to a list
#[derive(Debug, Clone, Serialize)]
pub struct NewListEntry {
    #[serde(rename = "pokemonId")]
    pub pokemon_id: u32,
    pub name: String,
    pub sprite: Option<String>,
    pub types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

pub struct ListApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ListApiClient {
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

    /// Fetch all records of one list
    pub async fn list(&self, kind: ListKind) -> Result<Vec<ListRecord>> {
        let url = format!("{}/api/{}", self.base_url, kind.path());
        let response = self.client.get(&url).send().await?;
        Self::decode(response).await
    }

    /// Create a record; the backend rejects duplicates and over-full teams
    pub async fn add(&self, kind: ListKind, entry: &NewListEntry) -> Result<ListRecord> {
        let url = format!("{}/api/{}", self.base_url, kind.path());
        let response = self.client.post(&url).json(entry).send().await?;
        Self::decode(response).await
    }

    /// Delete a record by its backend id
    pub async fn remove(&self, kind: ListKind, id: u64) -> Result<()> {
        let url = format!("{}/api/{}/{}", self.base_url, kind.path(), id);
        let response = self.client.delete(&url).send().await?;

        if response.status().is_success() {
            return Ok(());
        }
        Err(Self::rejection(response).await)
    }

    async fn decode<T: for<'de> Deserialize<'de>>(response: reqwest::Response) -> Result<T> {
        if response.status().is_success() {
            let value: T = response.json().await?;
            return Ok(value);
        }
        Err(Self::rejection(response).await)
    }

    /// Turn an error response into a typed rejection, falling back to the
    /// raw status line when the body is not the `{error, code}` envelope.
    async fn rejection(response: reqwest::Response) -> ListApiError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if let Ok(parsed) = serde_json::from_str::<ErrorBody>(&body) {
            if parsed.code.is_some() || parsed.error.is_some() {
                let code = ApiErrorCode::parse(parsed.code.as_deref().unwrap_or("ERROR"));
                let message = parsed.error.unwrap_or_else(|| "Unknown error".to_string());
                return ListApiError::Rejected { code, message };
            }
        }

        ListApiError::RequestFailed(format!("Status {}: {}", status, body))
    }
}
