#![forbid(unsafe_code)]

//! Colour scale and the legend that explains it.

use heatgrid_core::{Bounds, FontSpec, Point};
use heatgrid_layout::{Cell, CellBounds, Dimensions};

use crate::canvas::Canvas;
use crate::component::{Component, LayoutContext};
use crate::error::Result;

/// Ramp used when no legend colours are configured.
pub const DEFAULT_RAMP: [&str; 2] = ["#f7fbff", "#08306b"];

/// Number of tick labels beside the legend bar.
pub const LEGEND_TICKS: usize = 5;

/// Piecewise-constant mapping from values onto a list of colours.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    colors: Vec<String>,
    min: f64,
    max: f64,
}

impl ColorScale {
    /// Falls back to [`DEFAULT_RAMP`] when `colors` is empty.
    pub fn new(colors: Vec<String>, min: f64, max: f64) -> Self {
        let colors = if colors.is_empty() {
            DEFAULT_RAMP.iter().map(|c| (*c).to_string()).collect()
        } else {
            colors
        };
        Self { colors, min, max }
    }

    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    /// Colour for `value`; `None` for non-finite values.
    #[must_use]
    pub fn color_for(&self, value: f64) -> Option<&str> {
        if !value.is_finite() {
            return None;
        }
        let span = self.max - self.min;
        let t = if span > 0.0 {
            ((value - self.min) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let last = self.colors.len() - 1;
        let index = (t * last as f64).round() as usize;
        self.colors.get(index.min(last)).map(String::as_str)
    }

    /// `count` evenly spaced values from min to max.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match count {
            0 => Vec::new(),
            1 => vec![self.min],
            _ => (0..count)
                .map(|i| self.min + (self.max - self.min) * i as f64 / (count - 1) as f64)
                .collect(),
        }
    }
}

/// Two decimals at most, trailing zeros dropped.
pub fn format_tick(value: f64) -> String {
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// Vertical colour bar with tick labels, right of the colormap.
#[derive(Debug, Clone)]
pub struct ColorLegend {
    scale: ColorScale,
    font: FontSpec,
    left_space: f64,
    bar_width: f64,
    label_padding: f64,
    ticks: Vec<String>,
}

impl ColorLegend {
    pub fn new(
        scale: ColorScale,
        font: FontSpec,
        left_space: f64,
        bar_width: f64,
        label_padding: f64,
    ) -> Self {
        let ticks = scale.ticks(LEGEND_TICKS).into_iter().map(format_tick).collect();
        Self {
            scale,
            font,
            left_space,
            bar_width,
            label_padding,
            ticks,
        }
    }

    pub fn ticks(&self) -> &[String] {
        &self.ticks
    }
}

impl Component for ColorLegend {
    fn cell(&self) -> Cell {
        Cell::ColorLegend
    }

    fn preferred_dimensions(&mut self, ctx: &mut LayoutContext<'_>) -> Result<Dimensions> {
        let labels = ctx
            .measurer
            .max_extent(self.ticks.iter().map(String::as_str), &self.font, 0.0)?;
        Ok(Dimensions::new(
            self.left_space + self.bar_width + self.label_padding + labels.width,
            0.0,
        ))
    }

    fn draw(&mut self, bounds: CellBounds, canvas: &mut dyn Canvas) {
        let colors = self.scale.colors();
        let bar_left = bounds.left + self.left_space;
        let band = bounds.height / colors.len() as f64;
        // Highest value on top.
        for (i, color) in colors.iter().rev().enumerate() {
            let top = bounds.top + i as f64 * band;
            canvas.rect(Bounds::new(bar_left, top, self.bar_width, band), color);
        }

        let label_x = bar_left + self.bar_width + self.label_padding;
        let last = self.ticks.len().saturating_sub(1).max(1) as f64;
        for (i, tick) in self.ticks.iter().enumerate() {
            let y = bounds.top + bounds.height * (1.0 - i as f64 / last);
            canvas.text(Point::new(label_x, y), tick, &self.font, 0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use heatgrid_core::{HeatmapOptions, Size};
    use heatgrid_text::{LabelMeasurer, MonospaceBackend};

    use super::*;
    use crate::canvas::RecordingCanvas;

    fn scale() -> ColorScale {
        ColorScale::new(vec!["a".into(), "b".into(), "c".into()], 0.0, 10.0)
    }

    #[test]
    fn color_lookup_clamps_and_rounds() {
        let s = scale();
        assert_eq!(s.color_for(0.0), Some("a"));
        assert_eq!(s.color_for(5.0), Some("b"));
        assert_eq!(s.color_for(7.4), Some("b"));
        assert_eq!(s.color_for(7.6), Some("c"));
        assert_eq!(s.color_for(99.0), Some("c"));
        assert_eq!(s.color_for(-1.0), Some("a"));
        assert_eq!(s.color_for(f64::NAN), None);
    }

    #[test]
    fn flat_range_uses_first_color() {
        let s = ColorScale::new(Vec::new(), 3.0, 3.0);
        assert_eq!(s.color_for(3.0), Some(DEFAULT_RAMP[0]));
    }

    #[test]
    fn ticks_are_trimmed() {
        assert_eq!(scale().ticks(LEGEND_TICKS), vec![0.0, 2.5, 5.0, 7.5, 10.0]);
        assert_eq!(format_tick(2.5), "2.5");
        assert_eq!(format_tick(10.0), "10");
        assert_eq!(format_tick(-0.001), "0");
        assert_eq!(format_tick(1.234), "1.23");
    }

    #[test]
    fn width_reserves_bar_and_labels() {
        let options = HeatmapOptions::default();
        let mut measurer = LabelMeasurer::new(MonospaceBackend::new(0.5, 1.0));
        let mut ctx = LayoutContext {
            options: &options,
            canvas: Size::new(600.0, 600.0),
            measurer: &mut measurer,
        };
        let mut legend = ColorLegend::new(scale(), FontSpec::new("mono", 10.0), 10.0, 16.0, 4.0);
        let dims = legend.preferred_dimensions(&mut ctx).unwrap();
        // Widest tick is "2.5" / "7.5" / "10" at 5px per char.
        assert_eq!(dims.width, 10.0 + 16.0 + 4.0 + 15.0);

        let mut canvas = RecordingCanvas::new();
        legend.draw(
            CellBounds {
                top: 0.0,
                left: 100.0,
                width: dims.width,
                height: 90.0,
                canvas_width: 200.0,
                canvas_height: 90.0,
            },
            &mut canvas,
        );
        let fills: Vec<&str> = canvas.rects().map(|(_, fill)| fill).collect();
        assert_eq!(fills, vec!["c", "b", "a"]);
        assert_eq!(canvas.texts().count(), LEGEND_TICKS);
    }
}
