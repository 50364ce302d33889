#![forbid(unsafe_code)]

//! Title, subtitle and footer.

use heatgrid_core::{FontSpec, Point};
use heatgrid_layout::{Cell, CellBounds, Dimensions};

use crate::canvas::Canvas;
use crate::component::{Component, LayoutContext};
use crate::error::Result;

/// Word-wrapped text spanning the canvas width.
#[derive(Debug, Clone)]
pub struct TextBlock {
    cell: Cell,
    text: String,
    font: FontSpec,
    lines: Vec<String>,
    line_height: f64,
}

impl TextBlock {
    pub fn new(cell: Cell, text: impl Into<String>, font: FontSpec) -> Self {
        Self {
            cell,
            text: text.into(),
            font,
            lines: Vec::new(),
            line_height: 0.0,
        }
    }

    /// Lines produced by the last layout pass.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl Component for TextBlock {
    fn cell(&self) -> Cell {
        self.cell
    }

    fn preferred_dimensions(&mut self, ctx: &mut LayoutContext<'_>) -> Result<Dimensions> {
        let max_width = (ctx.canvas.width - 2.0 * ctx.options.outer_padding).max(0.0);
        self.lines = ctx.measurer.wrap_by_word(
            &self.text,
            max_width,
            &self.font,
            Some(ctx.options.text_max_lines),
        )?;
        self.line_height = ctx.measurer.line_height(&self.font)?;
        Ok(Dimensions::new(0.0, self.lines.len() as f64 * self.line_height))
    }

    fn draw(&mut self, bounds: CellBounds, canvas: &mut dyn Canvas) {
        let center = bounds.left + bounds.width / 2.0;
        for (i, line) in self.lines.iter().enumerate() {
            let baseline = bounds.top + (i as f64 + 1.0) * self.line_height;
            canvas.text(Point::new(center, baseline), line, &self.font, 0.0);
        }
    }
}
