#![forbid(unsafe_code)]

//! The colormap grid. It is the fill cell: whatever the other regions leave
//! over is its size.

use std::cell::RefCell;
use std::rc::Rc;

use heatgrid_core::{Bounds, Point, Size};
use heatgrid_layout::{Cell, CellBounds, Dimensions};
use heatgrid_runtime::{Datapoint, EventKind, InteractionController, ZoomTransform};

use super::legend::ColorScale;
use crate::canvas::Canvas;
use crate::component::{Component, LayoutContext, SharedView, ZoomView, subscribe_view};
use crate::error::Result;
use crate::matrix::Matrix;

const MISSING_FILL: &str = "#ccc";
const OUTLINE: &str = "#000";

#[derive(Debug)]
pub struct Colormap {
    matrix: Rc<Matrix>,
    scale: ColorScale,
    gap: f64,
    view: SharedView,
}

impl Colormap {
    /// `gap` is the spacing between cells; zero draws them edge to edge.
    pub fn new(matrix: Rc<Matrix>, scale: ColorScale, gap: f64) -> Self {
        let view = Rc::new(RefCell::new(ZoomView::new(matrix.shape())));
        Self {
            matrix,
            scale,
            gap,
            view,
        }
    }

    /// Datapoint under `point`, in the coordinates of `bounds`.
    pub fn hit_test(&self, bounds: &CellBounds, point: Point) -> Option<Datapoint> {
        hit_test(&self.matrix, &self.view.borrow().zoom, bounds, point)
    }

    fn outline(canvas: &mut dyn Canvas, b: Bounds) {
        let corners = [
            Point::new(b.left, b.top),
            Point::new(b.right(), b.top),
            Point::new(b.right(), b.bottom()),
            Point::new(b.left, b.bottom()),
        ];
        for (i, &from) in corners.iter().enumerate() {
            canvas.line(from, corners[(i + 1) % corners.len()], OUTLINE);
        }
    }
}

/// Map a canvas point onto the visible cell it falls in.
pub(crate) fn hit_test(
    matrix: &Matrix,
    zoom: &ZoomTransform,
    bounds: &CellBounds,
    point: Point,
) -> Option<Datapoint> {
    let area = bounds.bounds();
    if !area.contains(point) {
        return None;
    }
    let local = area.to_local(point);
    let cell = zoom.cell_size(bounds.width, bounds.height);
    if cell.width <= 0.0 || cell.height <= 0.0 {
        return None;
    }
    let cols = zoom.visible_cols();
    let rows = zoom.visible_rows();
    let col = cols.start + (local.x / cell.width).floor() as usize;
    let row = rows.start + (local.y / cell.height).floor() as usize;
    if !cols.contains(&col) || !rows.contains(&row) {
        return None;
    }
    matrix.get(row, col).map(|value| Datapoint::new(row, col, value))
}

impl Component for Colormap {
    fn cell(&self) -> Cell {
        Cell::Colormap
    }

    fn preferred_dimensions(&mut self, _ctx: &mut LayoutContext<'_>) -> Result<Dimensions> {
        Ok(Dimensions::ZERO)
    }

    fn draw(&mut self, bounds: CellBounds, canvas: &mut dyn Canvas) {
        let view = *self.view.borrow();
        let cell = view.zoom.cell_size(bounds.width, bounds.height);
        let inner = Size::new(
            (cell.width - self.gap).max(0.0),
            (cell.height - self.gap).max(0.0),
        );
        let cell_bounds = |slot_row: usize, slot_col: usize| {
            Bounds::new(
                bounds.left + slot_col as f64 * cell.width,
                bounds.top + slot_row as f64 * cell.height,
                inner.width,
                inner.height,
            )
        };

        let cols = view.zoom.visible_cols();
        for (slot_row, row) in view.zoom.visible_rows().enumerate() {
            for (slot_col, col) in cols.clone().enumerate() {
                let fill = self
                    .matrix
                    .get(row, col)
                    .and_then(|v| self.scale.color_for(v))
                    .unwrap_or(MISSING_FILL);
                canvas.rect(cell_bounds(slot_row, slot_col), fill);
            }
        }

        let (rows, cols) = (view.zoom.visible_rows(), view.zoom.visible_cols());
        let slot = |index: Option<usize>, range: &std::ops::Range<usize>| {
            index.filter(|i| range.contains(i)).map(|i| i - range.start)
        };
        let highlight = view.highlight;
        match (slot(highlight.row, &rows), slot(highlight.col, &cols)) {
            (Some(r), Some(c)) => Self::outline(canvas, cell_bounds(r, c)),
            (Some(r), None) if highlight.col.is_none() => Self::outline(
                canvas,
                Bounds::new(
                    bounds.left,
                    bounds.top + r as f64 * cell.height,
                    bounds.width,
                    cell.height,
                ),
            ),
            (None, Some(c)) if highlight.row.is_none() => Self::outline(
                canvas,
                Bounds::new(
                    bounds.left + c as f64 * cell.width,
                    bounds.top,
                    cell.width,
                    bounds.height,
                ),
            ),
            _ => {}
        }
        if let Some(d) = view.hovered
            && let (Some(r), Some(c)) = (slot(Some(d.row), &rows), slot(Some(d.col), &cols))
        {
            Self::outline(canvas, cell_bounds(r, c));
        }
    }

    fn subscribe(&mut self, controller: &mut InteractionController) {
        subscribe_view(&self.view, controller, &EventKind::ALL);
    }

    fn view(&self) -> Option<SharedView> {
        Some(Rc::clone(&self.view))
    }
}
