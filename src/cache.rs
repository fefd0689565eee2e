//! Known-token memo cache.
//!
//! Token validity is a static property of a dialect, so the cache is shared
//! process-wide by every connection using that dialect. Entries are populated
//! on first miss and never invalidated; population is idempotent, so racing
//! writers are harmless.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{OnceLock, RwLock};

use tracing::debug;

use crate::descriptor::StatementGroup;

type CacheKey = (String, StatementGroup);

/// Process-wide memo of `(dialect, group) -> (token -> bool)`.
#[derive(Debug, Default)]
pub struct KnownTokenCache {
    entries: RwLock<HashMap<CacheKey, HashMap<String, bool>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl KnownTokenCache {
    /// The shared cache used by every classifier in the process.
    pub fn global() -> &'static KnownTokenCache {
        static GLOBAL: OnceLock<KnownTokenCache> = OnceLock::new();
        GLOBAL.get_or_init(KnownTokenCache::default)
    }

    /// A private cache, independent of the process-wide one.
    pub fn new() -> Self {
        Self::default()
    }

    /// Memoized token validity for `token` within `group` on `dialect`.
    ///
    /// On a miss, `classify` computes the answer once and the result is
    /// stored under the dialect's sub-map.
    pub fn is_known(
        &self,
        dialect: &str,
        group: StatementGroup,
        token: &str,
        classify: impl FnOnce() -> bool,
    ) -> bool {
        if let Ok(entries) = self.entries.read() {
            if let Some(known) = entries
                .get(&(dialect.to_string(), group))
                .and_then(|tokens| tokens.get(token))
            {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return *known;
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let known = classify();
        debug!(dialect, group = %group, token, known, "known-token cache populated");

        if let Ok(mut entries) = self.entries.write() {
            entries
                .entry((dialect.to_string(), group))
                .or_default()
                .insert(token.to_string(), known);
        }

        known
    }

    /// (hits, misses) counters.
    pub fn stats(&self) -> (u64, u64) {
        (
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }

    /// Number of populated `(dialect, group)` sub-maps.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
