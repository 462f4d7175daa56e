use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::models::Detail;
use crate::search::{load_detail, CatalogSource};
use crate::store::CacheStore;

/// Snapshot of a detail load in flight or settled
#[derive(Debug, Clone, Default)]
pub struct DetailState {
    pub loading: bool,
    pub error: Option<String>,
    pub value: Option<Arc<Detail>>,
}

/// Single-entity loader keyed by a possibly-changing identifier.
///
/// Consumers point it at a key (route param, selection, whatever) and read
/// `{loading, error, value}` snapshots. Loads resolve through the shared
/// detail cache, so revisiting a key is free. Each load carries a
/// generation token; a resolution that lost the race to a newer load is
/// discarded instead of clobbering the newer state.
pub struct DetailLoader {
    source: Arc<dyn CatalogSource>,
    store: Arc<CacheStore>,
    key: Mutex<Option<String>>,
    generation: AtomicU64,
    state: Mutex<DetailState>,
}

impl DetailLoader {
    pub fn new(source: Arc<dyn CatalogSource>, store: Arc<CacheStore>) -> Self {
        Self {
            source,
            store,
            key: Mutex::new(None),
            generation: AtomicU64::new(0),
            state: Mutex::new(DetailState::default()),
        }
    }

    /// Current state snapshot
    pub fn state(&self) -> DetailState {
        self.state.lock().expect("detail state poisoned").clone()
    }

    /// The key the loader currently tracks
    pub fn key(&self) -> Option<String> {
        self.key.lock().expect("detail key poisoned").clone()
    }

    /// Point the loader at a new key and resolve it.
    ///
    /// An empty key is ignored and the previous state is retained.
    pub async fn set_key(&self, key: &str) {
        if key.is_empty() {
            return;
        }
        let key = key.to_lowercase();
        *self.key.lock().expect("detail key poisoned") = Some(key.clone());
        self.load(key).await;
    }

    /// Re-run the load for the current key
    pub async fn reload(&self) {
        let Some(key) = self.key() else {
            return;
        };
        self.load(key).await;
    }

    async fn load(&self, key: String) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.lock().expect("detail state poisoned");
            state.loading = true;
            state.error = None;
            state.value = None;
        }

        let result = load_detail(&self.source, &self.store, &key).await;

        // A newer load superseded this one while we were waiting; its
        // state wins
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(key = %key, "discarding stale detail load");
            return;
        }

        let mut state = self.state.lock().expect("detail state poisoned");
        state.loading = false;
        match result {
            Ok(detail) => state.value = Some(detail),
            // Transport failure and a genuine miss read the same to the
            // consumer; keep the message generic
            Err(_) => state.error = Some("Not found".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::FakeCatalog;
    use std::sync::atomic::Ordering as AtomicOrdering;
    use std::time::Duration;

    fn loader_for(fake: FakeCatalog) -> (Arc<FakeCatalog>, DetailLoader) {
        let fake = Arc::new(fake);
        let loader = DetailLoader::new(
            Arc::clone(&fake) as Arc<dyn CatalogSource>,
            Arc::new(CacheStore::new()),
        );
        (fake, loader)
    }

    #[tokio::test]
    async fn test_load_success_sets_value() {
        let (_, loader) = loader_for(FakeCatalog::with_universe(&["pikachu"]));

        loader.set_key("Pikachu").await;

        let state = loader.state();
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.value.unwrap().card.name, "pikachu");
        assert_eq!(loader.key().as_deref(), Some("pikachu"));
    }

    #[tokio::test]
    async fn test_load_failure_sets_generic_error() {
        let (_, loader) = loader_for(FakeCatalog::with_universe(&["pikachu"]));

        loader.set_key("missingno").await;

        let state = loader.state();
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Not found"));
        assert!(state.value.is_none());
    }

    #[tokio::test]
    async fn test_empty_key_retains_previous_state() {
        let (_, loader) = loader_for(FakeCatalog::with_universe(&["pikachu"]));

        loader.set_key("pikachu").await;
        loader.set_key("").await;

        let state = loader.state();
        assert_eq!(state.value.unwrap().card.name, "pikachu");
        assert_eq!(loader.key().as_deref(), Some("pikachu"));
    }

    #[tokio::test]
    async fn test_reload_reuses_cached_detail() {
        let (fake, loader) = loader_for(FakeCatalog::with_universe(&["pikachu"]));

        loader.set_key("pikachu").await;
        loader.reload().await;

        assert_eq!(fake.exact_calls.load(AtomicOrdering::SeqCst), 1);
        assert_eq!(loader.state().value.unwrap().card.name, "pikachu");
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_resolution_is_discarded() {
        let (_, loader) = loader_for(
            FakeCatalog::with_universe(&["slowpoke", "pikachu"])
                .with_delay("slowpoke", Duration::from_millis(100)),
        );

        // First load is slow; a second key change lands while it is in
        // flight. The slow resolution must not overwrite the newer state.
        tokio::join!(loader.set_key("slowpoke"), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            loader.set_key("pikachu").await;
        });

        let state = loader.state();
        assert!(!state.loading);
        assert_eq!(state.value.unwrap().card.name, "pikachu");
        assert_eq!(loader.key().as_deref(), Some("pikachu"));
    }
}
