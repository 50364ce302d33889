#![forbid(unsafe_code)]

//! Row and column dendrogram strips.
//!
//! The clustering tree itself is computed elsewhere; this component reserves
//! the strip and draws one stem per visible leaf joined by a crossbar.

use std::cell::RefCell;
use std::rc::Rc;

use heatgrid_core::Point;
use heatgrid_layout::{Cell, CellBounds, Dimensions};
use heatgrid_runtime::{EventKind, InteractionController, MatrixShape};

use crate::canvas::Canvas;
use crate::component::{Component, LayoutContext, SharedView, ZoomView, subscribe_view};
use crate::error::Result;

const STROKE: &str = "#555";

#[derive(Debug)]
pub struct Dendrogram {
    cell: Cell,
    size: f64,
    view: SharedView,
}

impl Dendrogram {
    /// `cell` is `Cell::TopDendrogram` (columns) or `Cell::LeftDendrogram` (rows).
    pub fn new(cell: Cell, size: f64, shape: MatrixShape) -> Self {
        Self {
            cell,
            size,
            view: Rc::new(RefCell::new(ZoomView::new(shape))),
        }
    }

    fn is_top(&self) -> bool {
        self.cell == Cell::TopDendrogram
    }
}

impl Component for Dendrogram {
    fn cell(&self) -> Cell {
        self.cell
    }

    fn preferred_dimensions(&mut self, _ctx: &mut LayoutContext<'_>) -> Result<Dimensions> {
        Ok(if self.is_top() {
            Dimensions::new(0.0, self.size)
        } else {
            Dimensions::new(self.size, 0.0)
        })
    }

    fn draw(&mut self, bounds: CellBounds, canvas: &mut dyn Canvas) {
        let zoom = self.view.borrow().zoom;
        let cell = zoom.cell_size(bounds.width, bounds.height);
        let (leaves, step) = if self.is_top() {
            (zoom.visible_cols().len(), cell.width)
        } else {
            (zoom.visible_rows().len(), cell.height)
        };
        if leaves == 0 {
            return;
        }

        // Stems run from the colormap edge halfway into the strip.
        let stem = |slot: usize| -> (Point, Point) {
            let along = (slot as f64 + 0.5) * step;
            if self.is_top() {
                let x = bounds.left + along;
                let base = bounds.top + bounds.height;
                (Point::new(x, base), Point::new(x, base - bounds.height / 2.0))
            } else {
                let y = bounds.top + along;
                let base = bounds.left + bounds.width;
                (Point::new(base, y), Point::new(base - bounds.width / 2.0, y))
            }
        };
        for slot in 0..leaves {
            let (from, to) = stem(slot);
            canvas.line(from, to, STROKE);
        }
        let (_, first) = stem(0);
        let (_, last) = stem(leaves - 1);
        canvas.line(first, last, STROKE);
    }

    fn subscribe(&mut self, controller: &mut InteractionController) {
        subscribe_view(&self.view, controller, &[EventKind::Transform]);
    }

    fn view(&self) -> Option<SharedView> {
        Some(Rc::clone(&self.view))
    }
}

#[cfg(test)]
mod tests {
    use heatgrid_runtime::{BrushExtent, gesture};

    use super::*;
    use crate::canvas::{DrawOp, RecordingCanvas};

    #[test]
    fn one_stem_per_visible_leaf() {
        let shape = MatrixShape::new(3, 6);
        let mut dendrogram = Dendrogram::new(Cell::TopDendrogram, 40.0, shape);
        let mut controller = InteractionController::new(shape);
        dendrogram.subscribe(&mut controller);

        let bounds = CellBounds {
            top: 0.0,
            left: 0.0,
            width: 120.0,
            height: 40.0,
            canvas_width: 120.0,
            canvas_height: 40.0,
        };
        let mut canvas = RecordingCanvas::new();
        dendrogram.draw(bounds, &mut canvas);
        assert_eq!(canvas.ops.len(), 6 + 1);

        gesture::brush_end(
            &mut controller,
            Some(BrushExtent::new([0.0, 0.0], [2.0, 3.0])),
            120.0,
            90.0,
        );
        canvas.clear();
        dendrogram.draw(bounds, &mut canvas);
        assert_eq!(canvas.ops.len(), 2 + 1);
        assert_eq!(
            canvas.ops[1],
            DrawOp::Line {
                from: Point::new(90.0, 40.0),
                to: Point::new(90.0, 20.0),
                stroke: STROKE.to_string(),
            }
        );
    }
}
