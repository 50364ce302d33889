#![forbid(unsafe_code)]

//! Brush-to-zoom derivation.
//!
//! A brush selects `[[x0, y0], [x1, y1]]` in data-cell coordinates. After
//! snapping to whole cells, the zoom that maps the selection onto a
//! `width × height` viewport is
//!
//! ```text
//! scale     = [cols / (x1 - x0), rows / (y1 - y0)]
//! translate = [-x0 · (width / cols) · scale[0], -y0 · (height / rows) · scale[1]]
//! ```
//!
//! An empty selection resets to the identity transform over the full matrix.
//! Every zoom-aware component derives its own visible range and cell size
//! from the transform; nothing else coordinates them.

use std::ops::Range;

use heatgrid_core::{Point, Size};

use crate::state::MatrixShape;

/// Raw brush selection in fractional cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushExtent {
    pub start: [f64; 2],
    pub end: [f64; 2],
}

impl BrushExtent {
    #[must_use]
    pub const fn new(start: [f64; 2], end: [f64; 2]) -> Self {
        Self { start, end }
    }

    /// Round to the nearest cell boundaries, order the corners and clamp to
    /// the matrix.
    #[must_use]
    pub fn snap(&self, shape: MatrixShape) -> CellRange {
        let snap = |v: f64, max: usize| -> usize {
            if v.is_nan() {
                return 0;
            }
            v.round().clamp(0.0, max as f64) as usize
        };
        let (xa, xb) = (snap(self.start[0], shape.cols), snap(self.end[0], shape.cols));
        let (ya, yb) = (snap(self.start[1], shape.rows), snap(self.end[1], shape.rows));
        CellRange {
            x0: xa.min(xb),
            y0: ya.min(yb),
            x1: xa.max(xb),
            y1: ya.max(yb),
        }
    }
}

/// Half-open range of whole cells: columns `x0..x1`, rows `y0..y1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellRange {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl CellRange {
    /// The whole matrix.
    #[must_use]
    pub const fn full(shape: MatrixShape) -> Self {
        Self {
            x0: 0,
            y0: 0,
            x1: shape.cols,
            y1: shape.rows,
        }
    }

    /// True when either side spans no cells.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }

    #[must_use]
    pub const fn cols(&self) -> Range<usize> {
        self.x0..self.x1
    }

    #[must_use]
    pub const fn rows(&self) -> Range<usize> {
        self.y0..self.y1
    }
}

/// Zoom applied independently by every zoom-aware component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTransform {
    pub scale: [f64; 2],
    pub translate: [f64; 2],
    pub extent: CellRange,
}

impl ZoomTransform {
    /// Fully zoomed out.
    #[must_use]
    pub const fn identity(shape: MatrixShape) -> Self {
        Self {
            scale: [1.0, 1.0],
            translate: [0.0, 0.0],
            extent: CellRange::full(shape),
        }
    }

    /// Zoom that maps `brush` onto a `width × height` viewport.
    #[must_use]
    pub fn from_brush(brush: BrushExtent, shape: MatrixShape, width: f64, height: f64) -> Self {
        let extent = brush.snap(shape);
        if extent.is_empty() || shape.is_empty() {
            return Self::identity(shape);
        }
        let (cols, rows) = (shape.cols as f64, shape.rows as f64);
        let scale = [
            cols / (extent.x1 - extent.x0) as f64,
            rows / (extent.y1 - extent.y0) as f64,
        ];
        let translate = [
            -(extent.x0 as f64) * (width / cols) * scale[0],
            -(extent.y0 as f64) * (height / rows) * scale[1],
        ];
        Self {
            scale,
            translate,
            extent,
        }
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.scale == [1.0, 1.0] && self.translate == [0.0, 0.0]
    }

    /// Visible data columns.
    #[must_use]
    pub const fn visible_cols(&self) -> Range<usize> {
        self.extent.cols()
    }

    /// Visible data rows.
    #[must_use]
    pub const fn visible_rows(&self) -> Range<usize> {
        self.extent.rows()
    }

    /// Pixel size of one visible cell in a `width × height` viewport.
    #[must_use]
    pub fn cell_size(&self, width: f64, height: f64) -> Size {
        let per = |extent: f64, count: usize| {
            if count == 0 { 0.0 } else { extent / count as f64 }
        };
        Size::new(
            per(width, self.visible_cols().len()),
            per(height, self.visible_rows().len()),
        )
    }

    /// Map an unzoomed viewport point into zoomed coordinates.
    #[must_use]
    pub fn apply(&self, point: Point) -> Point {
        Point::new(
            point.x * self.scale[0] + self.translate[0],
            point.y * self.scale[1] + self.translate[1],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;
    const SQUARE: MatrixShape = MatrixShape::new(3, 3);

    fn close(a: [f64; 2], b: [f64; 2]) -> bool {
        (a[0] - b[0]).abs() < EPS && (a[1] - b[1]).abs() < EPS
    }

    #[test]
    fn full_selection_is_identity() {
        let t = ZoomTransform::from_brush(BrushExtent::new([0.0, 0.0], [3.0, 3.0]), SQUARE, 300.0, 300.0);
        assert!(close(t.scale, [1.0, 1.0]));
        assert!(close(t.translate, [0.0, 0.0]));
        assert_eq!(t.extent, CellRange::full(SQUARE));
    }

    #[test]
    fn partial_selection_scales_and_translates() {
        let t = ZoomTransform::from_brush(BrushExtent::new([1.0, 1.0], [3.0, 3.0]), SQUARE, 300.0, 300.0);
        assert!(close(t.scale, [1.5, 1.5]));
        assert!(close(t.translate, [-150.0, -150.0]));
        assert_eq!(t.visible_cols(), 1..3);
        assert_eq!(t.visible_rows(), 1..3);
    }

    #[test]
    fn fractional_brush_snaps_to_cells() {
        let brush = BrushExtent::new([2.6, 0.4], [0.7, 1.6]);
        assert_eq!(
            brush.snap(SQUARE),
            CellRange {
                x0: 1,
                y0: 0,
                x1: 3,
                y1: 2
            }
        );
    }

    #[test]
    fn collapsed_brush_resets() {
        let t = ZoomTransform::from_brush(BrushExtent::new([1.2, 1.0], [0.9, 2.0]), SQUARE, 300.0, 300.0);
        assert_eq!(t, ZoomTransform::identity(SQUARE));
        assert!(t.is_identity());
    }

    #[test]
    fn out_of_matrix_brush_is_clamped() {
        let t = ZoomTransform::from_brush(BrushExtent::new([-4.0, -1.0], [9.0, 1.0]), SQUARE, 300.0, 90.0);
        assert_eq!(t.visible_cols(), 0..3);
        assert_eq!(t.visible_rows(), 0..1);
        assert!(close(t.scale, [1.0, 3.0]));
    }

    #[test]
    fn cell_size_follows_extent() {
        let t = ZoomTransform::from_brush(BrushExtent::new([1.0, 0.0], [3.0, 3.0]), SQUARE, 300.0, 300.0);
        assert_eq!(t.cell_size(300.0, 300.0), Size::new(150.0, 100.0));
        let p = t.apply(Point::new(100.0, 50.0));
        assert!((p.x - 0.0).abs() < EPS);
        assert!((p.y - 50.0).abs() < EPS);
    }

    #[test]
    fn empty_matrix_is_identity() {
        let shape = MatrixShape::new(0, 4);
        let t = ZoomTransform::from_brush(BrushExtent::new([0.0, 0.0], [2.0, 2.0]), shape, 10.0, 10.0);
        assert_eq!(t, ZoomTransform::identity(shape));
        assert_eq!(t.cell_size(10.0, 10.0), Size::new(2.5, 0.0));
    }
}
