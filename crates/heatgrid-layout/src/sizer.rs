#![forbid(unsafe_code)]

//! Anonymous rectangular split.
//!
//! [`GridSizer`] is the index-addressed sibling of the named-cell engine: an
//! ordered list of column widths and row heights, each either fixed or the
//! single [`Track::Fill`] wildcard that takes the remainder of the total.
//! No padding is inserted between tracks.
//!
//! # Example
//!
//! ```
//! use heatgrid_core::Size;
//! use heatgrid_layout::{GridSizer, Track};
//!
//! let sizer = GridSizer::new(
//!     &[Track::Fixed(40.0), Track::Fill],
//!     &[Track::Fixed(100.0)],
//!     Size::new(200.0, 100.0),
//! )?;
//! let b = sizer.cell_bounds(1, 0)?;
//! assert_eq!((b.left, b.width), (40.0, 160.0));
//! # Ok::<(), heatgrid_layout::LayoutError>(())
//! ```

use heatgrid_core::{Axis, Bounds, Size};
use tracing::warn;

use crate::error::LayoutError;

/// Tolerance when checking that fixed tracks sum to the total.
pub const SUM_TOLERANCE: f64 = 1e-6;

/// A single column width or row height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Track {
    Fixed(f64),
    /// Remainder of the total after every fixed track.
    Fill,
}

/// Resolved column widths and row heights.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSizer {
    widths: Vec<f64>,
    heights: Vec<f64>,
    left: Vec<f64>,
    top: Vec<f64>,
}

impl GridSizer {
    /// Resolve `widths` against `total.width` and `heights` against
    /// `total.height`.
    pub fn new(widths: &[Track], heights: &[Track], total: Size) -> Result<Self, LayoutError> {
        let widths = resolve_axis(widths, total.width, Axis::Horizontal)?;
        let heights = resolve_axis(heights, total.height, Axis::Vertical)?;
        Ok(Self {
            left: offsets(&widths),
            top: offsets(&heights),
            widths,
            heights,
        })
    }

    #[must_use]
    pub fn columns(&self) -> &[f64] {
        &self.widths
    }

    #[must_use]
    pub fn rows(&self) -> &[f64] {
        &self.heights
    }

    /// Bounds of the cell at `(col, row)`.
    pub fn cell_bounds(&self, col: usize, row: usize) -> Result<Bounds, LayoutError> {
        let check = |axis, index, len| {
            if index < len {
                Ok(())
            } else {
                Err(LayoutError::OutOfRange { axis, index, len })
            }
        };
        check(Axis::Horizontal, col, self.widths.len())?;
        check(Axis::Vertical, row, self.heights.len())?;
        Ok(Bounds::new(
            self.left[col],
            self.top[row],
            self.widths[col],
            self.heights[row],
        ))
    }
}

fn resolve_axis(tracks: &[Track], total: f64, axis: Axis) -> Result<Vec<f64>, LayoutError> {
    let fills = tracks.iter().filter(|t| matches!(t, Track::Fill)).count();
    let fixed: f64 = tracks
        .iter()
        .map(|t| match t {
            Track::Fixed(px) => *px,
            Track::Fill => 0.0,
        })
        .sum();

    match fills {
        0 => {
            if (fixed - total).abs() > SUM_TOLERANCE {
                return Err(LayoutError::Configuration(format!(
                    "{axis} tracks sum to {fixed} but the total is {total}"
                )));
            }
        }
        1 => {}
        n => {
            return Err(LayoutError::Configuration(format!(
                "{n} fill tracks on the {axis} axis, at most one is allowed"
            )));
        }
    }

    let remainder = total - fixed;
    if fills == 1 && remainder <= 0.0 {
        warn!(axis = %axis, remainder, "fill track resolved to a degenerate size");
    }
    Ok(tracks
        .iter()
        .map(|t| match t {
            Track::Fixed(px) => *px,
            Track::Fill => remainder,
        })
        .collect())
}

fn offsets(sizes: &[f64]) -> Vec<f64> {
    let mut pos = 0.0;
    sizes
        .iter()
        .map(|size| {
            let start = pos;
            pos += size;
            start
        })
        .collect()
}
