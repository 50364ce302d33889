#![forbid(unsafe_code)]

//! Measurement oracles.
//!
//! A [`MeasureBackend`] renders a temporary, invisible text probe and reports
//! its unrotated bounding box. Probes are always released through
//! [`ProbeGuard`], so a failing `bbox` call never leaves one attached.

use std::cell::{Cell, RefCell};
use std::fmt;

use heatgrid_core::{FontSpec, Size};
use rustc_hash::FxHashMap;
use unicode_width::UnicodeWidthStr;

/// Handle to a temporary probe owned by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProbeId(pub u64);

/// Failure reported by a measurement backend.
#[derive(Debug, Clone, PartialEq)]
pub enum MeasureError {
    /// The font cannot be realised (zero size, empty family, ...).
    InvalidFont { family: String, size: f64 },
    /// The backend could not create or read a probe.
    Backend(String),
}

impl fmt::Display for MeasureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFont { family, size } => {
                write!(f, "invalid font {family:?} at size {size}")
            }
            Self::Backend(msg) => write!(f, "measurement backend failed: {msg}"),
        }
    }
}

impl std::error::Error for MeasureError {}

/// Native text-metrics capability.
pub trait MeasureBackend {
    /// Create a temporary probe styled with `font`.
    fn attach(&self, font: &FontSpec) -> Result<ProbeId, MeasureError>;

    /// Unrotated bounding box of `text` rendered in `probe`.
    fn bbox(&self, probe: ProbeId, text: &str) -> Result<Size, MeasureError>;

    /// Remove the probe. Must not fail and must not flicker.
    fn detach(&self, probe: ProbeId);
}

/// Scoped probe: detaches on drop.
pub struct ProbeGuard<'a> {
    backend: &'a dyn MeasureBackend,
    probe: ProbeId,
}

impl<'a> ProbeGuard<'a> {
    pub fn attach(backend: &'a dyn MeasureBackend, font: &FontSpec) -> Result<Self, MeasureError> {
        let probe = backend.attach(font)?;
        Ok(Self { backend, probe })
    }

    pub fn bbox(&self, text: &str) -> Result<Size, MeasureError> {
        self.backend.bbox(self.probe, text)
    }
}

impl Drop for ProbeGuard<'_> {
    fn drop(&mut self) {
        self.backend.detach(self.probe);
    }
}

/// Fixed-advance backend driven by Unicode cell widths.
///
/// Each terminal cell of `unicode-width` counts as `advance_ratio` em; each
/// line is `line_height_ratio` em tall. Good enough to lay out labels before a
/// real shaping backend is available, and exact for tests.
#[derive(Debug)]
pub struct MonospaceBackend {
    advance_ratio: f64,
    line_height_ratio: f64,
    next_id: Cell<u64>,
    probes: RefCell<FxHashMap<ProbeId, f64>>,
}

impl MonospaceBackend {
    pub const DEFAULT_ADVANCE_RATIO: f64 = 0.6;
    pub const DEFAULT_LINE_HEIGHT_RATIO: f64 = 1.2;

    pub fn new(advance_ratio: f64, line_height_ratio: f64) -> Self {
        Self {
            advance_ratio,
            line_height_ratio,
            next_id: Cell::new(0),
            probes: RefCell::new(FxHashMap::default()),
        }
    }

    /// Number of probes currently attached.
    #[must_use]
    pub fn live_probes(&self) -> usize {
        self.probes.borrow().len()
    }
}

impl Default for MonospaceBackend {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ADVANCE_RATIO, Self::DEFAULT_LINE_HEIGHT_RATIO)
    }
}

impl MeasureBackend for MonospaceBackend {
    fn attach(&self, font: &FontSpec) -> Result<ProbeId, MeasureError> {
        if !(font.size.is_finite() && font.size > 0.0) || font.family.trim().is_empty() {
            return Err(MeasureError::InvalidFont {
                family: font.family.clone(),
                size: font.size,
            });
        }
        let probe = ProbeId(self.next_id.get());
        self.next_id.set(probe.0.wrapping_add(1));
        self.probes.borrow_mut().insert(probe, font.size);
        Ok(probe)
    }

    fn bbox(&self, probe: ProbeId, text: &str) -> Result<Size, MeasureError> {
        let size = self
            .probes
            .borrow()
            .get(&probe)
            .copied()
            .ok_or_else(|| MeasureError::Backend(format!("probe {} is not attached", probe.0)))?;
        let mut cells = 0usize;
        let mut lines = 0usize;
        for line in text.split('\n') {
            cells = cells.max(line.width());
            lines += 1;
        }
        Ok(Size::new(
            cells as f64 * self.advance_ratio * size,
            lines as f64 * self.line_height_ratio * size,
        ))
    }

    fn detach(&self, probe: ProbeId) {
        self.probes.borrow_mut().remove(&probe);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monospace_bbox_scales_with_font() {
        let backend = MonospaceBackend::new(0.5, 1.0);
        let guard = ProbeGuard::attach(&backend, &FontSpec::new("mono", 10.0)).unwrap();
        assert_eq!(guard.bbox("abcd").unwrap(), Size::new(20.0, 10.0));
        assert_eq!(guard.bbox("ab\nabcdef").unwrap(), Size::new(30.0, 20.0));
    }

    #[test]
    fn wide_chars_count_two_cells() {
        let backend = MonospaceBackend::new(0.5, 1.0);
        let guard = ProbeGuard::attach(&backend, &FontSpec::new("mono", 10.0)).unwrap();
        assert_eq!(guard.bbox("日本").unwrap().width, 20.0);
    }

    #[test]
    fn guard_detaches_on_drop() {
        let backend = MonospaceBackend::default();
        {
            let _a = ProbeGuard::attach(&backend, &FontSpec::default()).unwrap();
            let _b = ProbeGuard::attach(&backend, &FontSpec::default()).unwrap();
            assert_eq!(backend.live_probes(), 2);
        }
        assert_eq!(backend.live_probes(), 0);
    }

    #[test]
    fn detached_probe_cannot_measure() {
        let backend = MonospaceBackend::default();
        let probe = backend.attach(&FontSpec::default()).unwrap();
        backend.detach(probe);
        assert!(matches!(backend.bbox(probe, "x"), Err(MeasureError::Backend(_))));
    }

    #[test]
    fn invalid_font_is_rejected() {
        let backend = MonospaceBackend::default();
        let err = backend.attach(&FontSpec::new("mono", 0.0)).unwrap_err();
        assert!(matches!(err, MeasureError::InvalidFont { .. }));
        assert_eq!(backend.live_probes(), 0);
    }
}
