#![forbid(unsafe_code)]

//! Measured line wrapping.
//!
//! Both wrappers work on grapheme clusters and ask the [`LabelMeasurer`] for
//! every candidate line, so the result matches what the backend will render
//! rather than a character count.
//!
//! - [`LabelMeasurer::wrap_by_word`] breaks at spaces and hyphens.
//! - [`LabelMeasurer::wrap_by_character`] cuts rotated labels to fit a height.

use heatgrid_core::FontSpec;
use unicode_segmentation::UnicodeSegmentation;

use crate::backend::MeasureError;
use crate::measure::LabelMeasurer;

#[inline]
fn is_space(grapheme: &str) -> bool {
    grapheme.chars().all(char::is_whitespace)
}

#[inline]
fn is_hyphen(grapheme: &str) -> bool {
    grapheme == "-"
}

#[inline]
fn is_separator(grapheme: &str) -> bool {
    is_space(grapheme) || is_hyphen(grapheme)
}

impl LabelMeasurer {
    /// Greedy word wrap to `max_width`.
    ///
    /// Graphemes are appended while the line fits. On overflow the line breaks
    /// at its latest space (dropped) or hyphen (kept on the upper line). A run
    /// without a separator may overflow as long as a separator appears later
    /// in the text; otherwise it is broken at the overflowing grapheme.
    /// Embedded `\n` always breaks. At most `max_lines` lines are returned and
    /// the rest of the text is dropped.
    pub fn wrap_by_word(
        &mut self,
        text: &str,
        max_width: f64,
        font: &FontSpec,
        max_lines: Option<usize>,
    ) -> Result<Vec<String>, MeasureError> {
        let max_lines = max_lines.unwrap_or(usize::MAX);
        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            if lines.len() >= max_lines {
                break;
            }
            self.wrap_paragraph(paragraph, max_width, font, max_lines, &mut lines)?;
        }
        Ok(lines)
    }

    fn wrap_paragraph(
        &mut self,
        text: &str,
        max_width: f64,
        font: &FontSpec,
        max_lines: usize,
        lines: &mut Vec<String>,
    ) -> Result<(), MeasureError> {
        let g: Vec<&str> = text.graphemes(true).collect();
        let mut start = 0;
        let mut i = 0;
        let mut last_sep: Option<usize> = None;

        while i < g.len() {
            if lines.len() >= max_lines {
                return Ok(());
            }
            if i == start && is_space(g[i]) {
                i += 1;
                start = i;
                continue;
            }

            let candidate = g[start..=i].concat();
            let overflow = i > start && self.measure(&candidate, font, 0.0)?.width > max_width;
            if !overflow {
                if is_separator(g[i]) {
                    last_sep = Some(i);
                }
                i += 1;
                continue;
            }

            if is_space(g[i]) {
                // Only the trailing space overflows: break right here.
                lines.push(g[start..i].concat().trim_end().to_string());
                start = i + 1;
                i = start;
                last_sep = None;
                continue;
            }

            match last_sep {
                Some(sep) => {
                    let end = if is_hyphen(g[sep]) { sep + 1 } else { sep };
                    lines.push(g[start..end].concat().trim_end().to_string());
                    start = sep + 1;
                    while start < i && is_space(g[start]) {
                        start += 1;
                    }
                    last_sep = (start..i).rev().find(|&k| is_separator(g[k]));
                }
                None if g[i..].iter().any(|s| is_separator(s)) => {
                    if is_separator(g[i]) {
                        last_sep = Some(i);
                    }
                    i += 1;
                }
                None => {
                    lines.push(g[start..i].concat());
                    start = i;
                }
            }
        }

        if lines.len() < max_lines {
            let rest = g[start.min(g.len())..].concat();
            let rest = rest.trim_end();
            if !rest.is_empty() || g.is_empty() {
                lines.push(rest.to_string());
            }
        }
        Ok(())
    }

    /// Cut `text` into lines whose rotated height fits `max_height`.
    ///
    /// Each line is the longest remaining prefix that fits; a single grapheme
    /// is always taken so the loop makes progress. With `max_lines == 1` this
    /// is a plain truncation of a rotated label.
    pub fn wrap_by_character(
        &mut self,
        text: &str,
        max_height: f64,
        font: &FontSpec,
        rotation_degrees: f64,
        max_lines: usize,
    ) -> Result<Vec<String>, MeasureError> {
        let g: Vec<&str> = text.graphemes(true).collect();
        let mut lines = Vec::new();
        let mut start = 0;

        while start < g.len() && lines.len() < max_lines {
            let mut end = g.len();
            while end > start + 1 {
                let candidate = g[start..end].concat();
                if self.measure(&candidate, font, rotation_degrees)?.height <= max_height {
                    break;
                }
                end -= 1;
            }
            lines.push(g[start..end].concat());
            start = end;
        }
        Ok(lines)
    }
}
