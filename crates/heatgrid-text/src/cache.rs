#![forbid(unsafe_code)]

//! LRU cache for unrotated label extents.
//!
//! Wrapping and truncation re-measure the same prefixes many times per
//! render. The cache stores the backend's unrotated bounding box keyed by
//! font family, font size and text; rotation is projected afterwards, so one
//! entry serves every angle.
//!
//! # Example
//! ```
//! use heatgrid_core::{FontSpec, Size};
//! use heatgrid_text::MeasureCache;
//!
//! let mut cache = MeasureCache::new(64);
//! let font = FontSpec::new("mono", 10.0);
//! let size = cache.get_or_insert_with(&font, "abc", || Ok::<_, ()>(Size::new(18.0, 12.0)));
//! assert_eq!(size, Ok(Size::new(18.0, 12.0)));
//! assert_eq!(cache.stats().misses, 1);
//! ```

use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;

use heatgrid_core::{FontSpec, Size};
use lru::LruCache;
use rustc_hash::FxHasher;

/// Default cache capacity.
pub const DEFAULT_CACHE_CAPACITY: usize = 2048;

/// Statistics about cache performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Current number of entries.
    pub size: usize,
    pub capacity: usize,
}

impl CacheStats {
    /// Hit rate in `[0.0, 1.0]`.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// LRU cache of unrotated extents.
///
/// Keys are 64-bit FxHash digests of `(family, size, text)`; the full strings
/// are not retained.
#[derive(Debug)]
pub struct MeasureCache {
    cache: LruCache<u64, Size>,
    hits: u64,
    misses: u64,
}

impl MeasureCache {
    /// Create a cache with the given capacity (zero is treated as one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Return the cached extent or compute, store and return it.
    ///
    /// Errors from `compute` are returned as-is and nothing is stored.
    pub fn get_or_insert_with<E, F>(&mut self, font: &FontSpec, text: &str, compute: F) -> Result<Size, E>
    where
        F: FnOnce() -> Result<Size, E>,
    {
        let key = cache_key(font, text);
        if let Some(&size) = self.cache.get(&key) {
            self.hits += 1;
            return Ok(size);
        }
        self.misses += 1;
        let size = compute()?;
        self.cache.put(key, size);
        Ok(size)
    }

    /// Peek without computing or touching LRU order.
    #[must_use]
    pub fn peek(&self, font: &FontSpec, text: &str) -> Option<Size> {
        self.cache.peek(&cache_key(font, text)).copied()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn reset_stats(&mut self) {
        self.hits = 0;
        self.misses = 0;
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.cache.len(),
            capacity: self.cache.cap().get(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl Default for MeasureCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

#[inline]
fn cache_key(font: &FontSpec, text: &str) -> u64 {
    let mut hasher = FxHasher::default();
    font.family.hash(&mut hasher);
    font.size.to_bits().hash(&mut hasher);
    text.hash(&mut hasher);
    hasher.finish()
}
