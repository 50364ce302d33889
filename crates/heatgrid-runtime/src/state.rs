#![forbid(unsafe_code)]

//! Interaction state snapshots.

use crate::zoom::ZoomTransform;

/// Number of data rows and columns in the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MatrixShape {
    pub rows: usize,
    pub cols: usize,
}

impl MatrixShape {
    #[must_use]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }
}

/// Highlighted row and/or column. `None` means not highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Highlight {
    pub row: Option<usize>,
    pub col: Option<usize>,
}

impl Highlight {
    pub const NONE: Self = Self {
        row: None,
        col: None,
    };

    #[must_use]
    pub const fn row(row: usize) -> Self {
        Self {
            row: Some(row),
            col: None,
        }
    }

    #[must_use]
    pub const fn col(col: usize) -> Self {
        Self {
            row: None,
            col: Some(col),
        }
    }

    #[must_use]
    pub const fn cell(row: usize, col: usize) -> Self {
        Self {
            row: Some(row),
            col: Some(col),
        }
    }

    #[must_use]
    pub const fn is_none(&self) -> bool {
        self.row.is_none() && self.col.is_none()
    }
}

/// The matrix entry under the cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Datapoint {
    pub row: usize,
    pub col: usize,
    pub value: f64,
}

impl Datapoint {
    #[must_use]
    pub const fn new(row: usize, col: usize, value: f64) -> Self {
        Self { row, col, value }
    }
}

/// Everything the controller owns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionState {
    pub highlight: Highlight,
    pub hovered: Option<Datapoint>,
    pub zoom: ZoomTransform,
}

impl InteractionState {
    /// Cleared state: nothing highlighted or hovered, fully zoomed out.
    #[must_use]
    pub fn new(shape: MatrixShape) -> Self {
        Self {
            highlight: Highlight::NONE,
            hovered: None,
            zoom: ZoomTransform::identity(shape),
        }
    }
}
