#![forbid(unsafe_code)]

//! Degenerate layouts are reported through `tracing` at warn level and
//! rendering carries on with the degenerate size.

use std::sync::{Arc, Mutex};

use heatgrid_core::Size;
use heatgrid_layout::{Cell, Dimensions, GridLayoutEngine};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: Level,
    fields: Vec<(String, String)>,
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            fields: visitor.0,
        });
    }
}

fn capture<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(EventCapture {
        events: events.clone(),
    });
    tracing::subscriber::with_default(subscriber, f);
    events.lock().unwrap().clone()
}

fn warnings(events: &[CapturedEvent]) -> Vec<&CapturedEvent> {
    events.iter().filter(|e| e.level == Level::WARN).collect()
}

fn field<'a>(event: &'a CapturedEvent, name: &str) -> Option<&'a str> {
    event
        .fields
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

#[test]
fn negative_fill_emits_warning_and_keeps_size() {
    let mut width = 0.0;
    let events = capture(|| {
        let mut engine = GridLayoutEngine::new(Size::new(120.0, 200.0), 5.0, 5.0);
        engine.enable(Cell::LeftYAxis);
        engine.set_preferred_dimensions(Cell::LeftYAxis, Dimensions::new(150.0, 0.0));
        engine.enable(Cell::Colormap);
        engine.set_fill_cell(Cell::Colormap).unwrap();
        engine.all_components_registered();
        width = engine.cell_bounds(Cell::Colormap).unwrap().width;
    });

    assert!((width - (120.0 - 150.0 - 5.0 - 10.0)).abs() < 1e-9);
    let warns = warnings(&events);
    assert!(!warns.is_empty(), "expected a degenerate-layout warning");
    assert!(warns.iter().any(|e| {
        field(e, "diagnostic").is_some_and(|d| d.contains("colormap"))
    }));
    assert!(warns.iter().any(|e| {
        field(e, "diagnostic").is_some_and(|d| d.contains("horizontal layout needs"))
    }));
}

#[test]
fn healthy_layout_is_silent() {
    let events = capture(|| {
        let mut engine = GridLayoutEngine::new(Size::new(650.0, 650.0), 5.0, 5.0);
        engine.enable(Cell::Title);
        engine.set_preferred_dimensions(Cell::Title, Dimensions::new(0.0, 24.0));
        engine.enable(Cell::LeftYAxis);
        engine.set_preferred_dimensions(Cell::LeftYAxis, Dimensions::new(40.0, 0.0));
        engine.enable(Cell::Colormap);
        engine.set_fill_cell(Cell::Colormap).unwrap();
        engine.all_components_registered();
    });
    assert!(warnings(&events).is_empty());
}

#[test]
fn finalization_is_logged_at_debug() {
    let events = capture(|| {
        let mut engine = GridLayoutEngine::new(Size::new(100.0, 100.0), 0.0, 0.0);
        engine.all_components_registered();
    });
    assert!(events.iter().any(|e| {
        e.level == Level::DEBUG && field(e, "message") == Some("layout finalized")
    }));
    assert!(events.iter().any(|e| field(e, "rule") == Some("rightmost_margin")));
}
