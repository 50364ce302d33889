#![forbid(unsafe_code)]

//! Grid layout for the heatgrid widget.
//!
//! - [`Cell`], [`RowGroup`], [`ColumnGroup`] - the named regions and the
//!   grid bands they belong to
//! - [`GridLayoutEngine`] - two-phase registration and bounds resolution with
//!   at most one fill cell
//! - [`LayoutRule`] - finalization rules, e.g. [`RightmostMarginRule`]
//! - [`GridSizer`] - index-addressed split with one [`Track::Fill`] per axis
//!
//! # Example
//!
//! ```
//! use heatgrid_core::Size;
//! use heatgrid_layout::{Cell, Dimensions, GridLayoutEngine};
//!
//! let mut engine = GridLayoutEngine::new(Size::new(400.0, 300.0), 5.0, 5.0);
//! engine.enable(Cell::Title);
//! engine.set_preferred_dimensions(Cell::Title, Dimensions::new(0.0, 20.0));
//! engine.enable(Cell::Colormap);
//! engine.set_fill_cell(Cell::Colormap)?;
//! engine.all_components_registered();
//!
//! let map = engine.cell_bounds(Cell::Colormap)?;
//! assert_eq!(map.top, 5.0 + 20.0 + 5.0);
//! assert_eq!(map.height, 300.0 - 20.0 - 5.0 - 10.0);
//! # Ok::<(), heatgrid_layout::LayoutError>(())
//! ```

pub mod cell;
pub mod engine;
pub mod error;
pub mod rules;
pub mod sizer;

pub use cell::{Cell, ColumnGroup, RowGroup};
pub use engine::{
    CellBounds, ConditionalPolicy, Dimensions, GridLayoutEngine, LayoutDiagnostic, Phase,
};
pub use error::LayoutError;
pub use rules::{LayoutRule, RightmostMarginRule};
pub use sizer::{GridSizer, SUM_TOLERANCE, Track};
