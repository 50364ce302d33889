#![forbid(unsafe_code)]

//! Interactive heatmap widget core.
//!
//! This crate ties the layout, measurement and interaction crates together:
//! it defines the [`Component`] contract, ships one component per region
//! and offers [`Heatmap::render`] as the entry point.
//!
//! # Example
//! ```
//! use heatgrid::prelude::*;
//! use heatgrid::text::MonospaceBackend;
//!
//! let options = HeatmapOptions {
//!     legend_colors: Some(vec!["#fff".into(), "#c00".into()]),
//!     ..HeatmapOptions::default()
//! };
//! let matrix = Matrix::new(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
//! let heatmap = Heatmap::new(options, matrix).unwrap();
//!
//! let mut canvas = RecordingCanvas::new();
//! let mut rendered = heatmap
//!     .render(Size::new(400.0, 300.0), MonospaceBackend::default(), &mut canvas)
//!     .unwrap();
//! assert!(rendered.cell_bounds(Cell::Colormap).unwrap().width > 0.0);
//!
//! rendered.click_row_label(1);
//! assert_eq!(rendered.controller().highlight(), Highlight::row(1));
//! ```

pub mod canvas;
pub mod component;
pub mod components;
pub mod error;
pub mod heatmap;
pub mod matrix;

pub use canvas::{Canvas, DrawOp, RecordingCanvas};
pub use component::{Component, LayoutContext, SharedView, ZoomView, subscribe_view};
pub use error::{Error, Result};
pub use heatmap::{Heatmap, RenderedHeatmap};
pub use matrix::Matrix;

// --- Core re-exports -------------------------------------------------------

pub use heatgrid_core::{
    Axis, Bounds, ConfigError, FontSpec, HeatmapOptions, Point, SideColumn, Size, XAxisLocation,
    YAxisLocation,
};

// --- Layout re-exports -----------------------------------------------------

pub use heatgrid_layout::{Cell, CellBounds, Dimensions, GridLayoutEngine, LayoutDiagnostic};

// --- Runtime re-exports ----------------------------------------------------

pub use heatgrid_runtime::{
    BrushExtent, Datapoint, EventKind, Highlight, InteractionController, InteractionEvent,
    ZoomTransform,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        BrushExtent, Canvas, Cell, Component, Error, FontSpec, Heatmap, HeatmapOptions,
        Highlight, Matrix, RecordingCanvas, RenderedHeatmap, Result, Size,
    };
    pub use crate::{core, layout, runtime, text};
}

pub use heatgrid_core as core;
pub use heatgrid_layout as layout;
pub use heatgrid_runtime as runtime;
pub use heatgrid_text as text;
