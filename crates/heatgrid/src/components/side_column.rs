#![forbid(unsafe_code)]

//! Auxiliary label columns left of the colormap.
//!
//! Column `i` owns `Cell::LeftColumn(i)` for its values and
//! `Cell::LeftColumnHeader(i)` for its header, which sits in the top axis row.

use std::cell::RefCell;
use std::rc::Rc;

use heatgrid_core::{Axis, FontSpec, Point};
use heatgrid_layout::{Cell, CellBounds, Dimensions};
use heatgrid_runtime::{EventKind, InteractionController, MatrixShape};

use super::HIGHLIGHT_COLOR;
use crate::canvas::Canvas;
use crate::component::{Component, LayoutContext, SharedView, ZoomView, subscribe_view};
use crate::error::Result;

/// One value per matrix row, aligned with the colormap rows.
#[derive(Debug)]
pub struct SideColumnLabels {
    index: usize,
    source: Vec<String>,
    labels: Vec<String>,
    font: FontSpec,
    label_padding: f64,
    view: SharedView,
}

impl SideColumnLabels {
    pub fn new(
        index: usize,
        values: Vec<String>,
        font: FontSpec,
        label_padding: f64,
        shape: MatrixShape,
    ) -> Self {
        Self {
            index,
            labels: values.clone(),
            source: values,
            font,
            label_padding,
            view: Rc::new(RefCell::new(ZoomView::new(shape))),
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl Component for SideColumnLabels {
    fn cell(&self) -> Cell {
        Cell::LeftColumn(self.index)
    }

    fn preferred_dimensions(&mut self, ctx: &mut LayoutContext<'_>) -> Result<Dimensions> {
        let fitted = ctx.measurer.truncate_axis_labels_to_fit(
            &self.source,
            ctx.canvas.width,
            &self.font,
            0.0,
            Axis::Vertical,
        )?;
        self.labels = fitted.labels;
        let extent = ctx
            .measurer
            .max_extent(self.labels.iter().map(String::as_str), &self.font, 0.0)?;
        Ok(Dimensions::new(extent.width + self.label_padding, 0.0))
    }

    fn draw(&mut self, bounds: CellBounds, canvas: &mut dyn Canvas) {
        let view = *self.view.borrow();
        let step = view.zoom.cell_size(bounds.width, bounds.height).height;
        let highlight_font = self.font.clone().color(HIGHLIGHT_COLOR);
        for (slot, row) in view.zoom.visible_rows().enumerate() {
            let Some(label) = self.labels.get(row) else {
                continue;
            };
            let font = if view.highlight.row == Some(row) {
                &highlight_font
            } else {
                &self.font
            };
            let anchor = Point::new(bounds.left, bounds.top + (slot as f64 + 0.5) * step);
            canvas.text(anchor, label, font, 0.0);
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

/// Header above a side column.
#[derive(Debug, Clone)]
pub struct SideColumnHeader {
    index: usize,
    text: String,
    font: FontSpec,
    label_padding: f64,
}

impl SideColumnHeader {
    pub fn new(index: usize, text: impl Into<String>, font: FontSpec, label_padding: f64) -> Self {
        Self {
            index,
            text: text.into(),
            font,
            label_padding,
        }
    }
}

impl Component for SideColumnHeader {
    fn cell(&self) -> Cell {
        Cell::LeftColumnHeader(self.index)
    }

    fn preferred_dimensions(&mut self, ctx: &mut LayoutContext<'_>) -> Result<Dimensions> {
        let extent = ctx.measurer.measure(&self.text, &self.font, 0.0)?;
        Ok(Dimensions::new(extent.width, extent.height + self.label_padding))
    }

    fn draw(&mut self, bounds: CellBounds, canvas: &mut dyn Canvas) {
        let anchor = Point::new(
            bounds.left,
            bounds.top + bounds.height - self.label_padding,
        );
        canvas.text(anchor, &self.text, &self.font, 0.0);
    }
}
