#![forbid(unsafe_code)]

//! Axis labels and axis titles.
//!
//! Column labels run along the horizontal axis and may be rotated; row labels
//! run along the vertical axis. Both are truncated so that no label takes more
//! than a third of the canvas across its axis, and both follow the zoom
//! extent when redrawn.

use std::cell::RefCell;
use std::rc::Rc;

use heatgrid_core::{Axis, FontSpec, Point};
use heatgrid_layout::{Cell, CellBounds, Dimensions};
use heatgrid_runtime::{EventKind, InteractionController, MatrixShape};
use tracing::debug;

use super::HIGHLIGHT_COLOR;
use crate::canvas::Canvas;
use crate::component::{Component, LayoutContext, SharedView, ZoomView, subscribe_view};
use crate::error::Result;

/// Row or column labels next to the colormap.
#[derive(Debug)]
pub struct AxisLabels {
    cell: Cell,
    axis: Axis,
    source: Vec<String>,
    labels: Vec<String>,
    font: FontSpec,
    rotation: f64,
    label_padding: f64,
    view: SharedView,
}

impl AxisLabels {
    /// Column labels for `Cell::TopXAxis` or `Cell::BottomXAxis`.
    pub fn columns(
        cell: Cell,
        labels: Vec<String>,
        font: FontSpec,
        rotation: f64,
        label_padding: f64,
        shape: MatrixShape,
    ) -> Self {
        Self::new(cell, Axis::Horizontal, labels, font, rotation, label_padding, shape)
    }

    /// Row labels for `Cell::LeftYAxis` or `Cell::RightYAxis`.
    pub fn rows(
        cell: Cell,
        labels: Vec<String>,
        font: FontSpec,
        label_padding: f64,
        shape: MatrixShape,
    ) -> Self {
        Self::new(cell, Axis::Vertical, labels, font, 0.0, label_padding, shape)
    }

    fn new(
        cell: Cell,
        axis: Axis,
        labels: Vec<String>,
        font: FontSpec,
        rotation: f64,
        label_padding: f64,
        shape: MatrixShape,
    ) -> Self {
        Self {
            cell,
            axis,
            labels: labels.clone(),
            source: labels,
            font,
            rotation,
            label_padding,
            view: Rc::new(RefCell::new(ZoomView::new(shape))),
        }
    }

    /// Labels as drawn, after truncation.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    fn anchor(&self, bounds: &CellBounds, slot: usize, step: f64) -> Point {
        let along = (slot as f64 + 0.5) * step;
        match self.cell {
            Cell::TopXAxis => Point::new(
                bounds.left + along,
                bounds.top + bounds.height - self.label_padding,
            ),
            Cell::LeftYAxis => Point::new(
                bounds.left + bounds.width - self.label_padding,
                bounds.top + along,
            ),
            Cell::RightYAxis => Point::new(bounds.left + self.label_padding, bounds.top + along),
            _ => Point::new(bounds.left + along, bounds.top + self.label_padding),
        }
    }
}

impl Component for AxisLabels {
    fn cell(&self) -> Cell {
        self.cell
    }

    fn preferred_dimensions(&mut self, ctx: &mut LayoutContext<'_>) -> Result<Dimensions> {
        let fitted = ctx.measurer.truncate_axis_labels_to_fit(
            &self.source,
            self.axis.perpendicular().of(ctx.canvas),
            &self.font,
            self.rotation,
            self.axis,
        )?;
        if fitted.truncated > 0 {
            debug!(
                cell = %self.cell,
                truncated = fitted.truncated,
                duplicates = fitted.duplicates,
                budget = fitted.budget,
                "axis labels truncated"
            );
        }
        self.labels = fitted.labels;

        let extent = ctx
            .measurer
            .max_extent(self.labels.iter().map(String::as_str), &self.font, self.rotation)?;
        Ok(match self.axis {
            Axis::Horizontal => {
                let dims = Dimensions::new(0.0, extent.height + self.label_padding);
                if self.rotation == 0.0 {
                    dims
                } else {
                    dims.rightmost_margin(extent.width)
                }
            }
            Axis::Vertical => Dimensions::new(extent.width + self.label_padding, 0.0),
        })
    }

    fn draw(&mut self, bounds: CellBounds, canvas: &mut dyn Canvas) {
        let view = *self.view.borrow();
        let cell = view.zoom.cell_size(bounds.width, bounds.height);
        let (range, step, highlighted) = match self.axis {
            Axis::Horizontal => (view.zoom.visible_cols(), cell.width, view.highlight.col),
            Axis::Vertical => (view.zoom.visible_rows(), cell.height, view.highlight.row),
        };
        let highlight_font = self.font.clone().color(HIGHLIGHT_COLOR);
        for (slot, index) in range.enumerate() {
            let Some(label) = self.labels.get(index) else {
                continue;
            };
            let font = if highlighted == Some(index) {
                &highlight_font
            } else {
                &self.font
            };
            canvas.text(self.anchor(&bounds, slot, step), label, font, self.rotation);
        }
    }

    fn subscribe(&mut self, controller: &mut InteractionController) {
        subscribe_view(
            &self.view,
            controller,
            &[EventKind::Highlight, EventKind::Transform],
        );
    }

    fn view(&self) -> Option<SharedView> {
        Some(Rc::clone(&self.view))
    }
}

/// Title of one axis. Row axis titles are rotated a quarter turn.
#[derive(Debug, Clone)]
pub struct AxisTitle {
    cell: Cell,
    text: String,
    font: FontSpec,
}

impl AxisTitle {
    pub fn new(cell: Cell, text: impl Into<String>, font: FontSpec) -> Self {
        Self {
            cell,
            text: text.into(),
            font,
        }
    }

    fn rotation(&self) -> f64 {
        match self.cell {
            Cell::LeftYAxisTitle => -90.0,
            Cell::RightYAxisTitle => 90.0,
            _ => 0.0,
        }
    }
}

impl Component for AxisTitle {
    fn cell(&self) -> Cell {
        self.cell
    }

    fn preferred_dimensions(&mut self, ctx: &mut LayoutContext<'_>) -> Result<Dimensions> {
        let rotation = self.rotation();
        let extent = ctx.measurer.measure(&self.text, &self.font, rotation)?;
        Ok(if rotation == 0.0 {
            Dimensions::new(0.0, extent.height)
        } else {
            Dimensions::new(extent.width, 0.0)
        })
    }

    fn draw(&mut self, bounds: CellBounds, canvas: &mut dyn Canvas) {
        let center = Point::new(
            bounds.left + bounds.width / 2.0,
            bounds.top + bounds.height / 2.0,
        );
        canvas.text(center, &self.text, &self.font, self.rotation());
    }
}
