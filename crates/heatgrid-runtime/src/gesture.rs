#![forbid(unsafe_code)]

//! Caller-side gesture handlers.
//!
//! Toggling lives here rather than in the controller: a handler reads the
//! current highlight, and when the clicked index is already highlighted on
//! that dimension it writes the cleared highlight instead.

use crate::controller::InteractionController;
use crate::state::Highlight;
use crate::zoom::{BrushExtent, ZoomTransform};

/// Click on a row label.
pub fn toggle_row_highlight(controller: &mut InteractionController, row: usize) -> Highlight {
    let next = if controller.highlight().row == Some(row) {
        Highlight::NONE
    } else {
        Highlight::row(row)
    };
    controller.set_highlight(next);
    next
}

/// Click on a column label.
pub fn toggle_col_highlight(controller: &mut InteractionController, col: usize) -> Highlight {
    let next = if controller.highlight().col == Some(col) {
        Highlight::NONE
    } else {
        Highlight::col(col)
    };
    controller.set_highlight(next);
    next
}

/// Click on a colormap cell.
pub fn toggle_cell_highlight(
    controller: &mut InteractionController,
    row: usize,
    col: usize,
) -> Highlight {
    let clicked = Highlight::cell(row, col);
    let next = if controller.highlight() == clicked {
        Highlight::NONE
    } else {
        clicked
    };
    controller.set_highlight(next);
    next
}

/// End of a brush drag over a `width × height` colormap. `None` means the
/// brush was cleared or cancelled, which zooms all the way out.
pub fn brush_end(
    controller: &mut InteractionController,
    brush: Option<BrushExtent>,
    width: f64,
    height: f64,
) -> ZoomTransform {
    let shape = controller.shape();
    let transform = match brush {
        Some(brush) => ZoomTransform::from_brush(brush, shape, width, height),
        None => ZoomTransform::identity(shape),
    };
    controller.set_transform(transform);
    transform
}

/// Click on an empty part of the canvas.
pub fn click_empty_canvas(controller: &mut InteractionController) {
    controller.clear();
}
