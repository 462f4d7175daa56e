// Shared fakes for engine and loader tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use pokescout_api::pokeapi::{NamedResource, Pokemon, PokemonPage, Sprites};

use crate::search::CatalogSource;
use crate::{Error, Result};

/// Scriptable in-memory catalog.
///
/// The name list doubles as the universe (in order) and the set of keys
/// `fetch_exact` resolves. Ids default to position + 1 unless overridden
/// with `with_id`. Call counters let tests assert how much network a code
/// path would have cost.
#[derive(Default)]
pub struct FakeCatalog {
    names: Vec<String>,
    raw_types: Vec<String>,
    members: HashMap<String, Vec<String>>,
    ids: HashMap<String, u32>,
    delays: HashMap<String, Duration>,
    remote_total: Option<u32>,
    fail_members: bool,
    pub exact_calls: AtomicU32,
    pub page_calls: AtomicU32,
    pub members_calls: AtomicU32,
}

impl FakeCatalog {
    pub fn with_universe(names: &[&str]) -> Self {
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn with_type(mut self, type_name: &str, members: &[&str]) -> Self {
        self.raw_types.push(type_name.to_string());
        self.members.insert(
            type_name.to_string(),
            members.iter().map(|m| m.to_string()).collect(),
        );
        self
    }

    /// Replace the type list wholesale (members stay empty)
    pub fn with_raw_types(mut self, types: &[&str]) -> Self {
        self.raw_types = types.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_id(mut self, name: &str, id: u32) -> Self {
        self.ids.insert(name.to_string(), id);
        self
    }

    pub fn with_delay(mut self, name: &str, delay: Duration) -> Self {
        self.delays.insert(name.to_string(), delay);
        self
    }

    pub fn remote_total(mut self, total: u32) -> Self {
        self.remote_total = Some(total);
        self
    }

    pub fn fail_members(mut self) -> Self {
        self.fail_members = true;
        self
    }

    fn id_of(&self, name: &str) -> u32 {
        self.ids.get(name).copied().unwrap_or_else(|| {
            self.names
                .iter()
                .position(|n| n == name)
                .map(|i| i as u32 + 1)
                .unwrap_or(0)
        })
    }

    fn record(&self, name: &str) -> Pokemon {
        Pokemon {
            id: self.id_of(name),
            name: name.to_string(),
            sprites: Sprites::default(),
            types: Vec::new(),
            height: 0,
            weight: 0,
            abilities: Vec::new(),
            stats: Vec::new(),
            moves: Vec::new(),
        }
    }
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    async fn fetch_exact(&self, key: &str) -> Result<Pokemon> {
        self.exact_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(key) {
            tokio::time::sleep(*delay).await;
        }

        if key.chars().all(|c| c.is_ascii_digit()) {
            let id: u32 = key.parse().map_err(|_| Error::NotFound(key.to_string()))?;
            let name = self
                .names
                .iter()
                .find(|n| self.id_of(n) == id)
                .ok_or_else(|| Error::NotFound(key.to_string()))?;
            return Ok(self.record(name));
        }

        if self.names.iter().any(|n| n == key) {
            Ok(self.record(key))
        } else {
            Err(Error::NotFound(key.to_string()))
        }
    }

    async fn fetch_page(&self, offset: u32, limit: u32) -> Result<PokemonPage> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);
        let results = self
            .names
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|n| NamedResource {
                name: n.clone(),
                url: None,
            })
            .collect();
        Ok(PokemonPage {
            count: self.remote_total.unwrap_or(self.names.len() as u32),
            results,
        })
    }

    async fn fetch_types(&self) -> Result<Vec<String>> {
        Ok(self.raw_types.clone())
    }

    async fn fetch_type_members(&self, type_name: &str) -> Result<Vec<String>> {
        self.members_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_members {
            return Err(Error::ApiError("type service offline".to_string()));
        }
        Ok(self.members.get(type_name).cloned().unwrap_or_default())
    }
}
