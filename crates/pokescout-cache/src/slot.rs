use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use tokio::sync::OnceCell;
use tracing::debug;

/// A singleton cache region: filled at most once, then reused.
///
/// `get_or_load` runs the supplied loader only when the slot is empty.
/// Concurrent callers racing on an empty slot collapse into one in-flight
/// load and all observe its result. A failed load leaves the slot empty,
/// so the next caller gets a fresh attempt.
pub struct Slot<T> {
    cell: OnceCell<Arc<T>>,
}

impl<T> Slot<T> {
    pub fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Cached value, if the slot has been filled
    pub fn get(&self) -> Option<Arc<T>> {
        self.cell.get().cloned()
    }

    /// Return the cached value or run `load` once to fill the slot
    pub async fn get_or_load<F, Fut, E>(&self, load: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(value) = self.cell.get() {
            debug!("slot hit");
            return Ok(Arc::clone(value));
        }

        self.cell
            .get_or_try_init(|| async move {
                debug!("slot miss, loading");
                load().await.map(Arc::new)
            })
            .await
            .map(Arc::clone)
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A keyed cache region: one fill-once slot per string key.
///
/// Keys are taken as given; callers normalize (lower-case) before lookup.
pub struct KeyedSlot<V> {
    slots: Mutex<HashMap<String, Arc<OnceCell<Arc<V>>>>>,
}

impl<V> KeyedSlot<V> {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Cached value for `key`, if that key's slot has been filled
    pub fn get(&self, key: &str) -> Option<Arc<V>> {
        let slots = self.slots.lock().expect("keyed slot map poisoned");
        slots.get(key).and_then(|cell| cell.get().cloned())
    }

    /// Return the cached value for `key` or run `load` once to fill it.
    ///
    /// Distinct keys load independently; concurrent callers on the same
    /// missing key await a single in-flight load.
    pub async fn get_or_load<F, Fut, E>(&self, key: &str, load: F) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let cell = {
            let mut slots = self.slots.lock().expect("keyed slot map poisoned");
            Arc::clone(slots.entry(key.to_string()).or_default())
        };

        if let Some(value) = cell.get() {
            debug!(key, "keyed slot hit");
            return Ok(Arc::clone(value));
        }

        cell.get_or_try_init(|| async move {
            debug!(key, "keyed slot miss, loading");
            load().await.map(Arc::new)
        })
        .await
        .map(Arc::clone)
    }

    /// Number of filled slots (pending loads not counted)
    pub fn len(&self) -> usize {
        let slots = self.slots.lock().expect("keyed slot map poisoned");
        slots.values().filter(|cell| cell.get().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V> Default for KeyedSlot<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_slot_loads_once() {
        let slot = Slot::new();
        let call_count = AtomicU32::new(0);

        for _ in 0..3 {
            let value = slot
                .get_or_load(|| async {
                    call_count.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, &str>(42)
                })
                .await
                .unwrap();
            assert_eq!(*value, 42);
        }

        assert_eq!(call_count.load(Ordering::SeqCst), 1);
        assert_eq!(slot.get().as_deref(), Some(&42));
    }

    #[tokio::test]
    async fn test_slot_failed_load_stays_empty() {
        let slot: Slot<u32> = Slot::new();

        let result = slot
            .get_or_load(|| async { Err::<u32, _>("boom") })
            .await;
        assert_eq!(result.err(), Some("boom"));
        assert!(slot.get().is_none());

        // Next caller retries and can succeed
        let value = slot
            .get_or_load(|| async { Ok::<_, &str>(7) })
            .await
            .unwrap();
        assert_eq!(*value, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slot_concurrent_loads_collapse() {
        let slot = Arc::new(Slot::new());
        let call_count = Arc::new(AtomicU32::new(0));

        let load = |slot: Arc<Slot<u32>>, count: Arc<AtomicU32>| async move {
            slot.get_or_load(|| async {
                count.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(10)).await;
                Ok::<_, &str>(1)
            })
            .await
        };

        let (a, b) = tokio::join!(
            load(Arc::clone(&slot), Arc::clone(&call_count)),
            load(Arc::clone(&slot), Arc::clone(&call_count)),
        );

        assert_eq!(*a.unwrap(), 1);
        assert_eq!(*b.unwrap(), 1);
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_keyed_slot_loads_once_per_key() {
        let slots: KeyedSlot<String> = KeyedSlot::new();
        let call_count = AtomicU32::new(0);

        for key in ["fire", "water", "fire"] {
            let value = slots
                .get_or_load(key, || async {
                    call_count.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, &str>(key.to_uppercase())
                })
                .await
                .unwrap();
            assert_eq!(*value, key.to_uppercase());
        }

        assert_eq!(call_count.load(Ordering::SeqCst), 2); // fire + water
        assert_eq!(slots.len(), 2);
        assert_eq!(slots.get("fire").as_deref().map(String::as_str), Some("FIRE"));
        assert!(slots.get("grass").is_none());
    }

    #[tokio::test]
    async fn test_keyed_slot_failed_load_is_retryable() {
        let slots: KeyedSlot<u32> = KeyedSlot::new();

        let result = slots
            .get_or_load("pikachu", || async { Err::<u32, _>("offline") })
            .await;
        assert!(result.is_err());
        assert!(slots.is_empty());

        let value = slots
            .get_or_load("pikachu", || async { Ok::<_, &str>(25) })
            .await
            .unwrap();
        assert_eq!(*value, 25);
        assert_eq!(slots.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keyed_slot_concurrent_same_key_collapse() {
        let slots: Arc<KeyedSlot<u32>> = Arc::new(KeyedSlot::new());
        let call_count = Arc::new(AtomicU32::new(0));

        let load = |slots: Arc<KeyedSlot<u32>>, count: Arc<AtomicU32>| async move {
            slots
                .get_or_load("ditto", || async {
                    count.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    Ok::<_, &str>(132)
                })
                .await
        };

        let (a, b) = tokio::join!(
            load(Arc::clone(&slots), Arc::clone(&call_count)),
            load(Arc::clone(&slots), Arc::clone(&call_count)),
        );

        assert_eq!(*a.unwrap(), 132);
        assert_eq!(*b.unwrap(), 132);
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
    }
}
