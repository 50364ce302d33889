#![forbid(unsafe_code)]

//! Shared primitives for the heatgrid widget core.
//!
//! - [`geometry`] - pixel-space sizes and bounds
//! - [`config`] - the immutable per-render [`HeatmapOptions`]
//! - [`logging`] - optional subscriber installation

pub mod config;
pub mod geometry;
pub mod logging;

pub use config::{
    ConfigError, ConfigParse, FontSpec, HeatmapOptions, SideColumn, XAxisLocation, YAxisLocation,
};
pub use geometry::{Axis, Bounds, Point, Size};
