#![forbid(unsafe_code)]

//! Drawing surface.
//!
//! Components emit primitive shapes through [`Canvas`]; turning them into
//! SVG, a bitmap or anything else is the host's job. [`RecordingCanvas`]
//! keeps the calls as a list of [`DrawOp`]s.

use heatgrid_core::{Bounds, FontSpec, Point};

/// Sink for primitive drawing calls.
pub trait Canvas {
    fn rect(&mut self, bounds: Bounds, fill: &str);

    /// Text anchored at `anchor`, rotated clockwise by `rotation_degrees`.
    fn text(&mut self, anchor: Point, text: &str, font: &FontSpec, rotation_degrees: f64);

    fn line(&mut self, from: Point, to: Point, stroke: &str);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Rect {
        bounds: Bounds,
        fill: String,
    },
    Text {
        anchor: Point,
        text: String,
        font_size: f64,
        color: String,
        rotation: f64,
    },
    Line {
        from: Point,
        to: Point,
        stroke: String,
    },
}

/// Canvas that records every call.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    pub ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of every recorded text op, in call order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Bounds of every recorded rectangle.
    pub fn rects(&self) -> impl Iterator<Item = (&Bounds, &str)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Rect { bounds, fill } => Some((bounds, fill.as_str())),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl Canvas for RecordingCanvas {
    fn rect(&mut self, bounds: Bounds, fill: &str) {
        self.ops.push(DrawOp::Rect {
            bounds,
            fill: fill.to_string(),
        });
    }

    fn text(&mut self, anchor: Point, text: &str, font: &FontSpec, rotation_degrees: f64) {
        self.ops.push(DrawOp::Text {
            anchor,
            text: text.to_string(),
            font_size: font.size,
            color: font.color.clone(),
            rotation: rotation_degrees,
        });
    }

    fn line(&mut self, from: Point, to: Point, stroke: &str) {
        self.ops.push(DrawOp::Line {
            from,
            to,
            stroke: stroke.to_string(),
        });
    }
}
