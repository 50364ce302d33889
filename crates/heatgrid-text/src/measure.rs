#![forbid(unsafe_code)]

//! Predicted label extents.
//!
//! [`LabelMeasurer`] asks a [`MeasureBackend`] for the unrotated bounding box
//! of a label and projects it through the label's rotation:
//!
//! ```text
//! width'  = |cos θ|·w + |sin θ|·h
//! height' = |sin θ|·w + |cos θ|·h        θ = |rotation| in radians
//! ```
//!
//! The projection bounds the rotated rectangle, not the glyph outlines, so the
//! result is an upper-bound estimate.

use heatgrid_core::{FontSpec, Size};
use tracing::trace;

use crate::backend::{MeasureBackend, MeasureError, ProbeGuard};
use crate::cache::{CacheStats, DEFAULT_CACHE_CAPACITY, MeasureCache};

/// Project an unrotated extent through `rotation_degrees`.
#[must_use]
pub fn rotate_extent(size: Size, rotation_degrees: f64) -> Size {
    if rotation_degrees == 0.0 {
        return size;
    }
    let theta = rotation_degrees.abs().to_radians();
    let (sin, cos) = (theta.sin().abs(), theta.cos().abs());
    Size::new(
        cos * size.width + sin * size.height,
        sin * size.width + cos * size.height,
    )
}

/// Label measurement front end: backend + extent cache.
pub struct LabelMeasurer {
    backend: Box<dyn MeasureBackend>,
    cache: MeasureCache,
}

impl LabelMeasurer {
    /// Measurer with the default cache capacity.
    pub fn new(backend: impl MeasureBackend + 'static) -> Self {
        Self::with_cache_capacity(backend, DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_cache_capacity(backend: impl MeasureBackend + 'static, capacity: usize) -> Self {
        Self {
            backend: Box::new(backend),
            cache: MeasureCache::new(capacity),
        }
    }

    /// Unrotated bounding box of `text`.
    pub fn unrotated(&mut self, text: &str, font: &FontSpec) -> Result<Size, MeasureError> {
        let backend = self.backend.as_ref();
        self.cache.get_or_insert_with(font, text, || {
            let probe = ProbeGuard::attach(backend, font)?;
            let size = probe.bbox(text)?;
            trace!(
                text,
                family = %font.family,
                size = font.size,
                width = size.width,
                height = size.height,
                "measured label"
            );
            Ok(size)
        })
    }

    /// Bounding box of `text` after rotation by `rotation_degrees`.
    pub fn measure(
        &mut self,
        text: &str,
        font: &FontSpec,
        rotation_degrees: f64,
    ) -> Result<Size, MeasureError> {
        Ok(rotate_extent(self.unrotated(text, font)?, rotation_degrees))
    }

    /// Largest rotated extent over `labels` (zero for an empty list).
    pub fn max_extent<'a>(
        &mut self,
        labels: impl IntoIterator<Item = &'a str>,
        font: &FontSpec,
        rotation_degrees: f64,
    ) -> Result<Size, MeasureError> {
        let mut extent = Size::ZERO;
        for label in labels {
            extent = extent.max(self.measure(label, font, rotation_degrees)?);
        }
        Ok(extent)
    }

    /// Height of one line of text in `font`.
    pub fn line_height(&mut self, font: &FontSpec) -> Result<f64, MeasureError> {
        Ok(self.unrotated("", font)?.height)
    }

    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

impl std::fmt::Debug for LabelMeasurer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelMeasurer")
            .field("cache", &self.cache.stats())
            .finish_non_exhaustive()
    }
}
