#![forbid(unsafe_code)]

//! Label measurement for heatgrid.
//!
//! Layout needs to know how much room a label takes before anything is drawn.
//! This crate predicts it:
//!
//! - [`MeasureBackend`] - the native text-metrics oracle (probe, read, remove)
//! - [`LabelMeasurer`] - rotated extents, cached per font and text
//! - [`LabelMeasurer::wrap_by_word`] / [`LabelMeasurer::wrap_by_character`]
//! - [`LabelMeasurer::truncate_axis_labels_to_fit`]
//!
//! # Example
//! ```
//! use heatgrid_core::FontSpec;
//! use heatgrid_text::{LabelMeasurer, MonospaceBackend};
//!
//! let mut measurer = LabelMeasurer::new(MonospaceBackend::new(0.5, 1.0));
//! let font = FontSpec::new("mono", 10.0);
//!
//! let size = measurer.measure("label", &font, 0.0).unwrap();
//! assert_eq!(size.width, 25.0);
//!
//! let lines = measurer.wrap_by_word("the quick brown fox", 45.0, &font, None).unwrap();
//! assert_eq!(lines, vec!["the quick", "brown fox"]);
//! ```

pub mod backend;
pub mod cache;
pub mod measure;
pub mod truncate;
pub mod wrap;

pub use backend::{MeasureBackend, MeasureError, MonospaceBackend, ProbeGuard, ProbeId};
pub use cache::{CacheStats, DEFAULT_CACHE_CAPACITY, MeasureCache};
pub use measure::{LabelMeasurer, rotate_extent};
pub use truncate::{ELLIPSIS, TruncatedLabels};
