#![forbid(unsafe_code)]

//! Interaction runtime for the heatgrid widget.
//!
//! One [`InteractionController`] per render holds the highlight, hover and
//! zoom state. Components subscribe with [`InteractionController::on`] and
//! re-style themselves from the delivered [`InteractionEvent`]; gestures go
//! through the helpers in [`gesture`].
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use heatgrid_runtime::{EventKind, InteractionController, InteractionEvent, MatrixShape, gesture};
//!
//! let mut controller = InteractionController::new(MatrixShape::new(3, 3));
//! let seen = Rc::new(Cell::new(None));
//! let sink = seen.clone();
//! controller.on(EventKind::Highlight, move |event| {
//!     if let InteractionEvent::Highlight(h) = event {
//!         sink.set(h.row);
//!     }
//! });
//!
//! gesture::toggle_row_highlight(&mut controller, 1);
//! assert_eq!(seen.get(), Some(1));
//! gesture::toggle_row_highlight(&mut controller, 1);
//! assert_eq!(seen.get(), None);
//! ```

pub mod controller;
pub mod gesture;
pub mod state;
pub mod zoom;

pub use controller::{EventKind, InteractionController, InteractionEvent, SubscriptionId};
pub use state::{Datapoint, Highlight, InteractionState, MatrixShape};
pub use zoom::{BrushExtent, CellRange, ZoomTransform};
