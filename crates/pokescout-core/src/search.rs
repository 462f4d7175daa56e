use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::try_join_all;
use pokescout_api::{Pokemon, PokemonPage};
use tracing::{debug, warn};

use crate::mapper;
use crate::models::{Card, Detail, SearchOutcome, SearchRequest};
use crate::store::CacheStore;
use crate::Result;

/// One page of the full listing is enough to hold the whole name universe
const NAME_UNIVERSE_LIMIT: u32 = 100_000;

/// Meta types the catalog exposes but no pokemon meaningfully belongs to
const SENTINEL_TYPES: [&str; 2] = ["unknown", "shadow"];

/// Trait for catalog sources - makes testing easier and keeps things flexible
///
/// The real implementation wraps the PokeAPI client; tests swap in fakes.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_exact(&self, key: &str) -> Result<Pokemon>;
    async fn fetch_page(&self, offset: u32, limit: u32) -> Result<PokemonPage>;
    async fn fetch_types(&self) -> Result<Vec<String>>;
    async fn fetch_type_members(&self, type_name: &str) -> Result<Vec<String>>;
}

/// Faceted search over the catalog: free-text query, type intersection,
/// stable pagination - all on top of the cache store so repeat requests
/// stop costing network calls.
pub struct SearchEngine {
    source: Arc<dyn CatalogSource>,
    store: Arc<CacheStore>,
}

impl SearchEngine {
    pub fn new(source: Arc<dyn CatalogSource>, store: Arc<CacheStore>) -> Self {
        Self { source, store }
    }

    /// Run one search request.
    ///
    /// Never fails: any internal error comes back as an empty page with
    /// the message in `SearchOutcome::error`.
    pub async fn search(&self, req: &SearchRequest) -> SearchOutcome {
        match self.run(req).await {
            Ok((items, total)) => SearchOutcome {
                items,
                total,
                error: None,
            },
            Err(err) => {
                warn!("search failed: {}", err);
                SearchOutcome {
                    items: Vec::new(),
                    total: 0,
                    error: Some(err.to_string()),
                }
            }
        }
    }

    /// The filter list for consumers: sentinel types removed, sorted,
    /// fetched once per store lifetime.
    pub async fn types(&self) -> Result<Arc<Vec<String>>> {
        self.store
            .types
            .get_or_load(|| async move {
                let mut names = self.source.fetch_types().await?;
                names.retain(|n| !SENTINEL_TYPES.contains(&n.as_str()));
                names.sort();
                Ok(names)
            })
            .await
    }

    async fn run(&self, req: &SearchRequest) -> Result<(Vec<Card>, usize)> {
        // The type list shares the search lifecycle: loaded lazily before
        // the first search resolves
        self.types().await?;

        // None means "no filter applied", which falls through to the
        // remote listing; an empty Vec is a legitimate zero-result pool
        let mut pool: Option<Vec<String>> = None;

        if !req.types.is_empty() {
            pool = Some(self.intersect_types(&req.types).await?);
        }

        if !req.query.is_empty() {
            let key = req.query.to_lowercase();
            pool = Some(self.apply_query(&key, pool).await?);
        }

        match pool {
            Some(pool) => {
                debug!(candidates = pool.len(), "serving page from local pool");
                let total = pool.len();
                let start = req.page.saturating_sub(1).saturating_mul(req.page_size);
                let end = (start + req.page_size).min(pool.len());
                let slice: &[String] = if start >= pool.len() {
                    &[]
                } else {
                    &pool[start..end]
                };
                let items = self.cards_for(slice).await?;
                Ok((items, total))
            }
            None => {
                // Unfiltered view: page remotely instead of materializing
                // the whole universe, and trust the reported count
                let offset = req.page.saturating_sub(1).saturating_mul(req.page_size);
                let page = self
                    .source
                    .fetch_page(offset as u32, req.page_size as u32)
                    .await?;
                let names: Vec<String> = page.results.into_iter().map(|r| r.name).collect();
                debug!(total = page.count, "serving page from remote listing");
                let items = self.cards_for(&names).await?;
                Ok((items, page.count as usize))
            }
        }
    }

    /// Intersect the membership lists of the requested types, preserving
    /// the order of the first list.
    async fn intersect_types(&self, types: &[String]) -> Result<Vec<String>> {
        let sets = try_join_all(types.iter().map(|t| self.type_members(t))).await?;

        let mut names: Vec<String> = match sets.first() {
            Some(first) => first.as_ref().clone(),
            None => Vec::new(),
        };
        for set in &sets[1..] {
            let members: HashSet<&str> = set.iter().map(String::as_str).collect();
            names.retain(|n| members.contains(n.as_str()));
        }
        Ok(names)
    }

    /// Narrow (or establish) the candidate pool from the text query.
    ///
    /// Precedence is load-bearing: a purely numeric query is only ever an
    /// exact id lookup; otherwise exact name membership wins over prefix
    /// matching, and substring matching runs only when the prefix set is
    /// empty.
    async fn apply_query(&self, key: &str, pool: Option<Vec<String>>) -> Result<Vec<String>> {
        if is_numeric(key) {
            return Ok(match self.source.fetch_exact(key).await {
                Ok(p) => singleton_or_empty(pool, &p.name),
                // A miss (or any failure) on an id lookup is an empty
                // result, not a search error
                Err(err) => {
                    debug!("exact id lookup for '{}' failed: {}", key, err);
                    Vec::new()
                }
            });
        }

        let all = self.all_names().await?;
        if all.iter().any(|n| n == key) {
            return Ok(singleton_or_empty(pool, key));
        }

        let fuzzy = fuzzy_many(&all, key);
        Ok(match pool {
            Some(existing) => {
                let matches: HashSet<&str> = fuzzy.iter().map(String::as_str).collect();
                existing
                    .into_iter()
                    .filter(|n| matches.contains(n.as_str()))
                    .collect()
            }
            None => fuzzy,
        })
    }

    async fn all_names(&self) -> Result<Arc<Vec<String>>> {
        self.store
            .all_names
            .get_or_load(|| async move {
                let page = self.source.fetch_page(0, NAME_UNIVERSE_LIMIT).await?;
                Ok(page.results.into_iter().map(|r| r.name).collect())
            })
            .await
    }

    async fn type_members(&self, type_name: &str) -> Result<Arc<Vec<String>>> {
        let type_name = type_name.to_lowercase();
        let key: &str = &type_name;
        self.store
            .type_members
            .get_or_load(key, || async move {
                self.source.fetch_type_members(key).await
            })
            .await
    }

    /// Fetch details for exactly the given page of names (never the whole
    /// pool) and project them to cards. Each detail is cached by key, so
    /// revisiting a page is free.
    async fn cards_for(&self, names: &[String]) -> Result<Vec<Card>> {
        let details = try_join_all(
            names
                .iter()
                .map(|n| load_detail(&self.source, &self.store, n)),
        )
        .await?;
        Ok(details.iter().map(|d| d.card.clone()).collect())
    }
}

/// Resolve one detail record through the cache, fetching on first demand.
/// Shared by the search page path and the detail loader so both fill the
/// same region.
pub(crate) async fn load_detail(
    source: &Arc<dyn CatalogSource>,
    store: &CacheStore,
    key: &str,
) -> Result<Arc<Detail>> {
    store
        .details
        .get_or_load(key, || async move {
            let raw = source.fetch_exact(key).await?;
            Ok(mapper::to_detail(&raw))
        })
        .await
}

/// Collapse a pool to the single `name`, or to nothing if the existing
/// pool does not contain it
fn singleton_or_empty(pool: Option<Vec<String>>, name: &str) -> Vec<String> {
    match pool {
        Some(existing) => {
            if existing.iter().any(|n| n == name) {
                vec![name.to_string()]
            } else {
                Vec::new()
            }
        }
        None => vec![name.to_string()],
    }
}

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Prefix matches first; substring matches only when no name starts with
/// the query
fn fuzzy_many(names: &[String], q: &str) -> Vec<String> {
    let mut list: Vec<String> = names.iter().filter(|n| n.starts_with(q)).cloned().collect();
    if list.is_empty() {
        list = names.iter().filter(|n| n.contains(q)).cloned().collect();
    }
    list
}
