//! Memoised JSON text of the flattened view.

/// Hit/miss counters for the JSON cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// `to_json_text` calls served from the cache
    pub hits: u64,
    /// `to_json_text` calls that had to render
    pub misses: u64,
    /// Mutations that dropped a valid cached text
    pub invalidations: u64,
}

/// The last rendered JSON text, valid until the next mutation.
#[derive(Debug, Default)]
pub(crate) struct JsonCache {
    text: Option<String>,
    stats: CacheStats,
}

impl JsonCache {
    /// Returns the cached text, counting a hit, or `None`, counting a miss.
    pub(crate) fn lookup(&mut self) -> Option<&str> {
        match self.text {
            Some(ref text) => {
                self.stats.hits += 1;
                tracing::trace!(hits = self.stats.hits, "JSON cache hit");
                Some(text)
            }
            None => {
                self.stats.misses += 1;
                tracing::trace!(misses = self.stats.misses, "JSON cache miss");
                None
            }
        }
    }

    pub(crate) fn store(&mut self, text: String) {
        self.text = Some(text);
    }

    pub(crate) fn invalidate(&mut self) {
        if self.text.take().is_some() {
            self.stats.invalidations += 1;
        }
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.text.is_some()
    }

    pub(crate) fn stats(&self) -> CacheStats {
        self.stats
    }
}
