#![forbid(unsafe_code)]

//! Axis label truncation.
//!
//! Axis labels may take at most a third of the canvas extent perpendicular to
//! their axis. Labels over budget lose trailing graphemes and gain an
//! ellipsis until they fit. Two labels can truncate to the same text; the
//! collision is counted in [`TruncatedLabels::duplicates`] and left as is.

use heatgrid_core::{Axis, FontSpec, Size};
use rustc_hash::FxHashSet;
use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

use crate::backend::MeasureError;
use crate::measure::LabelMeasurer;

/// Marker appended to truncated labels.
pub const ELLIPSIS: &str = "…";

/// Result of [`LabelMeasurer::truncate_axis_labels_to_fit`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TruncatedLabels {
    /// Same length and order as the input.
    pub labels: Vec<String>,
    /// Budget each label was fitted to.
    pub budget: f64,
    /// Number of labels that were shortened.
    pub truncated: usize,
    /// Number of shortened labels whose text matches an earlier output.
    pub duplicates: usize,
}

/// Extent of a label measured across its axis.
///
/// Column labels (horizontal axis) grow downward, so their height counts; row
/// labels (vertical axis) grow sideways, so their width counts.
#[inline]
fn projected_length(size: Size, axis: Axis) -> f64 {
    axis.perpendicular().of(size)
}

impl LabelMeasurer {
    /// Shorten labels so each projected length is at most a third of
    /// `perpendicular_extent`.
    ///
    /// Nothing changes when the longest label already fits.
    pub fn truncate_axis_labels_to_fit<S: AsRef<str>>(
        &mut self,
        labels: &[S],
        perpendicular_extent: f64,
        font: &FontSpec,
        rotation_degrees: f64,
        axis: Axis,
    ) -> Result<TruncatedLabels, MeasureError> {
        let budget = perpendicular_extent / 3.0;
        let mut out: Vec<String> = labels.iter().map(|l| l.as_ref().to_string()).collect();

        let mut longest = 0.0_f64;
        for label in &out {
            longest = longest.max(projected_length(self.measure(label, font, rotation_degrees)?, axis));
        }
        if longest <= budget {
            return Ok(TruncatedLabels {
                labels: out,
                budget,
                truncated: 0,
                duplicates: 0,
            });
        }

        let mut truncated = 0;
        let mut duplicates = 0;
        let mut seen: FxHashSet<String> = FxHashSet::default();
        for label in &mut out {
            let length = projected_length(self.measure(label, font, rotation_degrees)?, axis);
            if length > budget {
                *label = self.shorten(label, budget, font, rotation_degrees, axis)?;
                truncated += 1;
                if !seen.insert(label.clone()) {
                    duplicates += 1;
                }
            } else {
                seen.insert(label.clone());
            }
        }

        debug!(
            budget,
            longest,
            truncated,
            duplicates,
            axis = %axis,
            "truncated axis labels"
        );
        Ok(TruncatedLabels {
            labels: out,
            budget,
            truncated,
            duplicates,
        })
    }

    fn shorten(
        &mut self,
        label: &str,
        budget: f64,
        font: &FontSpec,
        rotation_degrees: f64,
        axis: Axis,
    ) -> Result<String, MeasureError> {
        let mut graphemes: Vec<&str> = label.graphemes(true).collect();
        while graphemes.pop().is_some() {
            let candidate = format!("{}{ELLIPSIS}", graphemes.concat().trim_end());
            if projected_length(self.measure(&candidate, font, rotation_degrees)?, axis) <= budget {
                return Ok(candidate);
            }
        }
        Ok(ELLIPSIS.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MonospaceBackend;

    fn setup() -> (LabelMeasurer, FontSpec) {
        (
            LabelMeasurer::new(MonospaceBackend::new(0.5, 1.0)),
            FontSpec::new("mono", 10.0),
        )
    }

    #[test]
    fn short_labels_are_untouched() {
        let (mut m, font) = setup();
        let out = m
            .truncate_axis_labels_to_fit(&["a", "bb"], 300.0, &font, 0.0, Axis::Vertical)
            .unwrap();
        assert_eq!(out.labels, vec!["a", "bb"]);
        assert_eq!(out.truncated, 0);
        assert!((out.budget - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn row_labels_truncate_by_width() {
        let (mut m, font) = setup();
        // Budget 30px = six graphemes including the ellipsis.
        let out = m
            .truncate_axis_labels_to_fit(&["short", "a much longer label"], 90.0, &font, 0.0, Axis::Vertical)
            .unwrap();
        assert_eq!(out.labels, vec!["short", "a muc…"]);
        assert_eq!(out.truncated, 1);
    }

    #[test]
    fn column_labels_truncate_by_rotated_height() {
        let (mut m, font) = setup();
        let out = m
            .truncate_axis_labels_to_fit(&["abcdefghijkl"], 90.0 + 1e-6, &font, 90.0, Axis::Horizontal)
            .unwrap();
        assert_eq!(out.labels, vec!["abcde…"]);
    }

    #[test]
    fn duplicates_are_counted_not_renamed() {
        let (mut m, font) = setup();
        let out = m
            .truncate_axis_labels_to_fit(
                &["sample_alpha", "sample_beta", "x"],
                60.0,
                &font,
                0.0,
                Axis::Vertical,
            )
            .unwrap();
        assert_eq!(out.labels, vec!["sam…", "sam…", "x"]);
        assert_eq!(out.truncated, 2);
        assert_eq!(out.duplicates, 1);
    }

    #[test]
    fn tiny_budget_leaves_only_ellipsis() {
        let (mut m, font) = setup();
        let out = m
            .truncate_axis_labels_to_fit(&["abc"], 3.0, &font, 0.0, Axis::Vertical)
            .unwrap();
        assert_eq!(out.labels, vec![ELLIPSIS]);
    }

    #[test]
    fn output_length_matches_input() {
        let (mut m, font) = setup();
        let labels: Vec<String> = (0..20).map(|i| format!("label number {i}")).collect();
        let out = m
            .truncate_axis_labels_to_fit(&labels, 45.0, &font, 0.0, Axis::Vertical)
            .unwrap();
        assert_eq!(out.labels.len(), labels.len());
        assert!(out.labels.iter().all(|l| l.ends_with(ELLIPSIS)));
    }
}
