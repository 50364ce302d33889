#![forbid(unsafe_code)]

//! Shared interaction state with ordered, synchronous broadcast.
//!
//! # Invariants
//!
//! 1. Every setter stores the new value before any subscriber runs, so each
//!    callback sees the complete snapshot.
//! 2. Subscribers of one [`EventKind`] run in subscription order.
//! 3. Every setter call notifies, even when the value is unchanged.
//! 4. A [`SubscriptionId`] removed with [`InteractionController::off`] is
//!    never called again.
//!
//! Callbacks receive the event by reference and cannot reach the controller,
//! so a broadcast always runs to completion before the next one starts.

use std::fmt;

use tracing::{debug, trace};

use crate::state::{Datapoint, Highlight, InteractionState, MatrixShape};
use crate::zoom::ZoomTransform;

/// Which part of the state changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Highlight,
    Hover,
    Transform,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [EventKind::Highlight, EventKind::Hover, EventKind::Transform];

    pub const fn as_str(self) -> &'static str {
        match self {
            EventKind::Highlight => "highlight",
            EventKind::Hover => "hover",
            EventKind::Transform => "transform",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload delivered to subscribers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionEvent {
    Highlight(Highlight),
    /// `None` clears the hover.
    Hover(Option<Datapoint>),
    Transform(ZoomTransform),
}

impl InteractionEvent {
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            InteractionEvent::Highlight(_) => EventKind::Highlight,
            InteractionEvent::Hover(_) => EventKind::Hover,
            InteractionEvent::Transform(_) => EventKind::Transform,
        }
    }
}

/// Opaque handle returned by [`InteractionController::on`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&InteractionEvent)>;

struct Subscriber {
    id: SubscriptionId,
    kind: EventKind,
    callback: Callback,
}

/// Single owner of highlight, hover and zoom state for one render.
pub struct InteractionController {
    shape: MatrixShape,
    state: InteractionState,
    subscribers: Vec<Subscriber>,
    next_id: u64,
}

impl InteractionController {
    /// Controller in the cleared state for a matrix of `shape`.
    #[must_use]
    pub fn new(shape: MatrixShape) -> Self {
        Self {
            shape,
            state: InteractionState::new(shape),
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    #[inline]
    pub fn shape(&self) -> MatrixShape {
        self.shape
    }

    #[inline]
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Register `callback` for `kind`.
    pub fn on(
        &mut self,
        kind: EventKind,
        callback: impl FnMut(&InteractionEvent) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(Subscriber {
            id,
            kind,
            callback: Box::new(callback),
        });
        trace!(kind = %kind, id = id.0, "subscribed");
        id
    }

    /// Remove a subscription. Returns false if it was already gone.
    pub fn off(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        before != self.subscribers.len()
    }

    #[must_use]
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.subscribers.iter().filter(|s| s.kind == kind).count()
    }

    // --- Highlight ---

    #[inline]
    pub fn highlight(&self) -> Highlight {
        self.state.highlight
    }

    /// Replace the highlight and notify.
    pub fn set_highlight(&mut self, highlight: Highlight) {
        self.state.highlight = highlight;
        self.emit(InteractionEvent::Highlight(highlight));
    }

    // --- Hover ---

    #[inline]
    pub fn hovered_datapoint(&self) -> Option<Datapoint> {
        self.state.hovered
    }

    pub fn set_hovered_datapoint(&mut self, datapoint: Option<Datapoint>) {
        self.state.hovered = datapoint;
        self.emit(InteractionEvent::Hover(datapoint));
    }

    // --- Zoom ---

    #[inline]
    pub fn transform(&self) -> ZoomTransform {
        self.state.zoom
    }

    pub fn set_transform(&mut self, transform: ZoomTransform) {
        debug!(
            scale_x = transform.scale[0],
            scale_y = transform.scale[1],
            translate_x = transform.translate[0],
            translate_y = transform.translate[1],
            "zoom transform"
        );
        self.state.zoom = transform;
        self.emit(InteractionEvent::Transform(transform));
    }

    /// Reset every field and notify every kind.
    pub fn clear(&mut self) {
        self.state = InteractionState::new(self.shape);
        let state = self.state;
        self.emit(InteractionEvent::Highlight(state.highlight));
        self.emit(InteractionEvent::Hover(state.hovered));
        self.emit(InteractionEvent::Transform(state.zoom));
    }

    fn emit(&mut self, event: InteractionEvent) {
        let kind = event.kind();
        let mut delivered = 0usize;
        for subscriber in self.subscribers.iter_mut().filter(|s| s.kind == kind) {
            (subscriber.callback)(&event);
            delivered += 1;
        }
        trace!(kind = %kind, delivered, "broadcast");
    }
}

impl fmt::Debug for InteractionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionController")
            .field("shape", &self.shape)
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
