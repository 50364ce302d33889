#![forbid(unsafe_code)]

use std::fmt;

use heatgrid_core::Axis;

use crate::cell::Cell;

/// Errors raised by [`GridLayoutEngine`](crate::GridLayoutEngine) and
/// [`GridSizer`](crate::GridSizer).
///
/// All variants indicate a programming or sequencing bug on the caller's
/// side. Degenerate but valid layouts are reported through
/// [`LayoutDiagnostic`](crate::LayoutDiagnostic) instead.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// Invalid layout setup.
    Configuration(String),
    /// Bounds were requested for a disabled cell.
    NotEnabled(Cell),
    /// A [`GridSizer`](crate::GridSizer) index outside `[0, len)`.
    OutOfRange { axis: Axis, index: usize, len: usize },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(msg) => write!(f, "layout configuration error: {msg}"),
            Self::NotEnabled(cell) => write!(f, "cell {cell} is not enabled"),
            Self::OutOfRange { axis, index, len } => {
                write!(f, "{axis} index {index} out of range 0..{len}")
            }
        }
    }
}

impl std::error::Error for LayoutError {}
