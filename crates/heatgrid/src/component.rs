#![forbid(unsafe_code)]

//! The contract between the layout core and drawing components.
//!
//! A component owns one [`Cell`]. During registration it reports
//! [`Component::preferred_dimensions`]; after finalization it is drawn once
//! into its resolved bounds and may subscribe to the controller. Subscribers
//! keep their own [`ZoomView`] up to date and must tolerate events arriving
//! before or after any other component's draw.

use std::cell::RefCell;
use std::rc::Rc;

use heatgrid_core::{HeatmapOptions, Size};
use heatgrid_layout::{Cell, CellBounds, Dimensions};
use heatgrid_runtime::{
    Datapoint, EventKind, Highlight, InteractionController, InteractionEvent, MatrixShape,
    ZoomTransform,
};
use heatgrid_text::LabelMeasurer;

use crate::canvas::Canvas;
use crate::error::Result;

/// Inputs available while components compute their preferred size.
pub struct LayoutContext<'a> {
    pub options: &'a HeatmapOptions,
    pub canvas: Size,
    pub measurer: &'a mut LabelMeasurer,
}

/// A drawable region of the heatmap.
pub trait Component {
    /// The layout cell this component draws into.
    fn cell(&self) -> Cell;

    /// Preferred size; zero on an axis accepts whatever is allocated.
    fn preferred_dimensions(&mut self, ctx: &mut LayoutContext<'_>) -> Result<Dimensions>;

    /// Draw into the resolved bounds.
    fn draw(&mut self, bounds: CellBounds, canvas: &mut dyn Canvas);

    /// Register interaction callbacks.
    fn subscribe(&mut self, _controller: &mut InteractionController) {}

    /// Interaction state as this component last saw it, if it tracks any.
    fn view(&self) -> Option<SharedView> {
        None
    }
}

/// Per-component copy of the interaction state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomView {
    pub highlight: Highlight,
    pub hovered: Option<Datapoint>,
    pub zoom: ZoomTransform,
    /// Number of events applied since the component subscribed.
    pub restyles: usize,
}

impl ZoomView {
    #[must_use]
    pub fn new(shape: MatrixShape) -> Self {
        Self {
            highlight: Highlight::NONE,
            hovered: None,
            zoom: ZoomTransform::identity(shape),
            restyles: 0,
        }
    }

    /// Apply one event. Idempotent for repeated identical events apart from
    /// the restyle counter.
    pub fn apply(&mut self, event: &InteractionEvent) {
        match *event {
            InteractionEvent::Highlight(h) => self.highlight = h,
            InteractionEvent::Hover(d) => self.hovered = d,
            InteractionEvent::Transform(t) => self.zoom = t,
        }
        self.restyles += 1;
    }
}

pub type SharedView = Rc<RefCell<ZoomView>>;

/// Keep `view` in sync with `controller` for the given event kinds.
pub fn subscribe_view(
    view: &SharedView,
    controller: &mut InteractionController,
    kinds: &[EventKind],
) {
    for &kind in kinds {
        let view = Rc::clone(view);
        controller.on(kind, move |event| view.borrow_mut().apply(event));
    }
}
