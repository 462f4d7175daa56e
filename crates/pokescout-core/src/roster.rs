// Centralized favorites/team state on top of the internal list API.
// Pages and components go through here so they never touch endpoints or
// error envelopes directly.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use pokescout_api::{
    ApiErrorCode, ListApiClient, ListApiError, ListKind, ListRecord, NewListEntry,
};

use crate::models::Card;

/// Seam over the list API so the roster is testable without a backend
#[async_trait]
pub trait ListApi: Send + Sync {
    async fn list(&self, kind: ListKind) -> Result<Vec<ListRecord>, ListApiError>;
    async fn add(&self, kind: ListKind, entry: &NewListEntry) -> Result<ListRecord, ListApiError>;
    async fn remove(&self, kind: ListKind, id: u64) -> Result<(), ListApiError>;
}

#[async_trait]
impl ListApi for ListApiClient {
    async fn list(&self, kind: ListKind) -> Result<Vec<ListRecord>, ListApiError> {
        ListApiClient::list(self, kind).await
    }

    async fn add(&self, kind: ListKind, entry: &NewListEntry) -> Result<ListRecord, ListApiError> {
        ListApiClient::add(self, kind, entry).await
    }

    async fn remove(&self, kind: ListKind, id: u64) -> Result<(), ListApiError> {
        ListApiClient::remove(self, kind, id).await
    }
}

/// What a roster action did, normalized for UI toasts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
    Added,
    Removed,
}

#[derive(Debug, Clone, Default)]
pub struct ActionOutcome {
    pub ok: bool,
    pub action: Option<ListAction>,
    pub message: Option<String>,
}

impl ActionOutcome {
    fn ok(action: ListAction) -> Self {
        Self {
            ok: true,
            action: Some(action),
            message: None,
        }
    }

    fn failed(message: String) -> Self {
        Self {
            ok: false,
            action: None,
            message: Some(message),
        }
    }
}

/// Favorites and team membership, indexed by pokemon id.
///
/// The backend stores records under its own ids; these maps remember
/// pokemon id -> record id so toggles and removals can address them.
pub struct Roster<A: ListApi> {
    api: A,
    favorites: Mutex<HashMap<u32, u64>>,
    team: Mutex<HashMap<u32, u64>>,
}

impl<A: ListApi> Roster<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            favorites: Mutex::new(HashMap::new()),
            team: Mutex::new(HashMap::new()),
        }
    }

    /// Fetch the favorites list and resync the id map
    pub async fn load_favorites(&self) -> Result<Vec<ListRecord>, ListApiError> {
        let records = self.api.list(ListKind::Favorites).await?;
        let mut map = self.favorites.lock().expect("favorites map poisoned");
        map.clear();
        map.extend(records.iter().map(|r| (r.pokemon_id, r.id)));
        drop(map);
        Ok(records)
    }

    /// Fetch the team list and resync the id map
    pub async fn load_team(&self) -> Result<Vec<ListRecord>, ListApiError> {
        let records = self.api.list(ListKind::Team).await?;
        let mut map = self.team.lock().expect("team map poisoned");
        map.clear();
        map.extend(records.iter().map(|r| (r.pokemon_id, r.id)));
        drop(map);
        Ok(records)
    }

    /// Add the pokemon to favorites, or remove it if already present
    pub async fn toggle_favorite(&self, card: &Card) -> ActionOutcome {
        let existing = {
            let map = self.favorites.lock().expect("favorites map poisoned");
            map.get(&card.id).copied()
        };

        match existing {
            Some(record_id) => match self.api.remove(ListKind::Favorites, record_id).await {
                Ok(()) => {
                    self.favorites
                        .lock()
                        .expect("favorites map poisoned")
                        .remove(&card.id);
                    ActionOutcome::ok(ListAction::Removed)
                }
                Err(err) => ActionOutcome::failed(humanize_list_error(&err)),
            },
            None => match self.api.add(ListKind::Favorites, &entry_of(card)).await {
                Ok(record) => {
                    self.favorites
                        .lock()
                        .expect("favorites map poisoned")
                        .insert(card.id, record.id);
                    ActionOutcome::ok(ListAction::Added)
                }
                Err(err) => ActionOutcome::failed(humanize_list_error(&err)),
            },
        }
    }

    /// Add the pokemon to the team; duplicates are rejected locally, the
    /// size cap is the backend's call
    pub async fn add_to_team(&self, card: &Card) -> ActionOutcome {
        {
            let map = self.team.lock().expect("team map poisoned");
            if map.contains_key(&card.id) {
                return ActionOutcome::failed("Already in Team".to_string());
            }
        }

        match self.api.add(ListKind::Team, &entry_of(card)).await {
            Ok(record) => {
                self.team
                    .lock()
                    .expect("team map poisoned")
                    .insert(card.id, record.id);
                ActionOutcome::ok(ListAction::Added)
            }
            Err(err) => ActionOutcome::failed(humanize_list_error(&err)),
        }
    }

    /// Remove a pokemon from the team by its pokemon id; absent is a no-op
    pub async fn remove_from_team(&self, pokemon_id: u32) -> ActionOutcome {
        let record_id = {
            let map = self.team.lock().expect("team map poisoned");
            map.get(&pokemon_id).copied()
        };

        let Some(record_id) = record_id else {
            // nothing to remove
            return ActionOutcome::ok(ListAction::Removed);
        };

        match self.api.remove(ListKind::Team, record_id).await {
            Ok(()) => {
                self.team
                    .lock()
                    .expect("team map poisoned")
                    .remove(&pokemon_id);
                ActionOutcome::ok(ListAction::Removed)
            }
            Err(err) => ActionOutcome::failed(humanize_list_error(&err)),
        }
    }

    pub fn favorites_count(&self) -> usize {
        self.favorites.lock().expect("favorites map poisoned").len()
    }

    pub fn team_count(&self) -> usize {
        self.team.lock().expect("team map poisoned").len()
    }

    pub fn is_favorite(&self, pokemon_id: u32) -> bool {
        self.favorites
            .lock()
            .expect("favorites map poisoned")
            .contains_key(&pokemon_id)
    }

    pub fn is_team_member(&self, pokemon_id: u32) -> bool {
        self.team
            .lock()
            .expect("team map poisoned")
            .contains_key(&pokemon_id)
    }
}

fn entry_of(card: &Card) -> NewListEntry {
    NewListEntry {
        pokemon_id: card.id,
        name: card.name.clone(),
        sprite: card.sprite.clone(),
        types: card.types.clone(),
    }
}

/// Map known backend rejection codes to friendly messages; everything
/// else keeps the backend's own message, cleaned up.
pub fn humanize_list_error(err: &ListApiError) -> String {
    match err {
        ListApiError::Rejected { code, message } => match code {
            ApiErrorCode::TeamFull => "Team is full (max 6).".to_string(),
            ApiErrorCode::Duplicate => "Already exists, cannot duplicate.".to_string(),
            ApiErrorCode::Validation => "Missing or invalid fields.".to_string(),
            _ => {
                let cleaned = message.trim();
                if cleaned.is_empty() {
                    "Something went wrong.".to_string()
                } else {
                    cleaned.to_string()
                }
            }
        },
        _ => "Something went wrong.".to_string(),
    }
}
