//! Per-run prefix cache.
//!
//! Maps a SKU prefix to its resolution result. Created empty by the batch
//! runner for each run and dropped with it. Each prefix owns a single
//! `OnceCell` slot, so concurrent rows with the same never-seen prefix
//! await one resolution instead of probing twice.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::OnceCell;

use crate::record::ResolutionResult;

type Slot = Arc<OnceCell<ResolutionResult>>;

#[derive(Debug, Default)]
pub struct PrefixCache {
    slots: Mutex<HashMap<String, Slot>>,
}

impl PrefixCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache pre-seeded with known results.
    pub fn with_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, ResolutionResult)>,
        K: Into<String>,
    {
        let cache = Self::new();
        for (prefix, result) in entries {
            cache.put(prefix, result);
        }
        cache
    }

    /// Resolved result for `prefix`, if one has been stored.
    pub fn get(&self, prefix: &str) -> Option<ResolutionResult> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.get(prefix).and_then(|slot| slot.get().cloned())
    }

    /// Store `result` for `prefix`. The first stored result wins.
    pub fn put(&self, prefix: impl Into<String>, result: ResolutionResult) {
        let slot = self.slot(&prefix.into());
        let _ = slot.set(result);
    }

    /// Return the stored result for `prefix`, awaiting `resolve` only if no
    /// other caller has resolved (or is resolving) it yet.
    pub async fn get_or_resolve<Fut>(&self, prefix: &str, resolve: Fut) -> ResolutionResult
    where
        Fut: std::future::Future<Output = ResolutionResult>,
    {
        let slot = self.slot(prefix);
        slot.get_or_init(|| resolve).await.clone()
    }

    /// Number of prefixes with a stored result.
    pub fn len(&self) -> usize {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.values().filter(|slot| slot.initialized()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, prefix: &str) -> Slot {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(prefix.to_string()).or_default())
    }
}
