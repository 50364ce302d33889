#![forbid(unsafe_code)]

//! Built-in region components.
//!
//! One component per [`Cell`](heatgrid_layout::Cell). Which ones a render
//! uses is decided by [`Heatmap::components`](crate::Heatmap::components)
//! from the options.

pub mod axis;
pub mod colormap;
pub mod dendrogram;
pub mod legend;
pub mod side_column;
pub mod text_block;

pub use axis::{AxisLabels, AxisTitle};
pub use colormap::Colormap;
pub use dendrogram::Dendrogram;
pub use legend::{ColorLegend, ColorScale};
pub use side_column::{SideColumnHeader, SideColumnLabels};
pub use text_block::TextBlock;

/// Text colour of highlighted labels.
pub(crate) const HIGHLIGHT_COLOR: &str = "#e6550d";
