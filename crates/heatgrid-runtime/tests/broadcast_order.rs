#![forbid(unsafe_code)]

//! Broadcast ordering and gesture semantics.
//!
//! 1. Subscribers are notified in subscription order, interleaved kinds
//!    included.
//! 2. A subscriber registered later never sees earlier events.
//! 3. Each delivered snapshot equals the controller state at that moment.
//! 4. Toggle gestures match a simple reference model.
//! 5. Double-click on a label restores the previous highlight unless another
//!    row was highlighted.

use std::cell::RefCell;
use std::rc::Rc;

use heatgrid_runtime::{
    BrushExtent, Datapoint, EventKind, Highlight, InteractionController, InteractionEvent,
    MatrixShape, gesture,
};
use proptest::prelude::*;

#[test]
fn subscribers_fire_in_registration_order() {
    let mut c = InteractionController::new(MatrixShape::new(3, 3));
    let order = Rc::new(RefCell::new(Vec::new()));
    for (i, kind) in [
        EventKind::Highlight,
        EventKind::Transform,
        EventKind::Highlight,
        EventKind::Highlight,
    ]
    .into_iter()
    .enumerate()
    {
        let sink = order.clone();
        c.on(kind, move |e| sink.borrow_mut().push((i, e.kind())));
    }

    c.set_highlight(Highlight::row(0));
    assert_eq!(
        *order.borrow(),
        vec![
            (0, EventKind::Highlight),
            (2, EventKind::Highlight),
            (3, EventKind::Highlight)
        ]
    );
}

#[test]
fn late_subscriber_sees_only_later_events() {
    let mut c = InteractionController::new(MatrixShape::new(3, 3));
    c.set_hovered_datapoint(Some(Datapoint::new(0, 0, 1.0)));
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    c.on(EventKind::Hover, move |e| sink.borrow_mut().push(*e));
    c.set_hovered_datapoint(None);
    assert_eq!(*seen.borrow(), vec![InteractionEvent::Hover(None)]);
}

#[test]
fn double_click_restores_pre_click_state() {
    let mut c = InteractionController::new(MatrixShape::new(3, 3));
    let before = c.highlight();
    gesture::toggle_row_highlight(&mut c, 2);
    gesture::toggle_row_highlight(&mut c, 2);
    assert_eq!(c.highlight(), before);
}

#[test]
fn zoom_round_trip() {
    let mut c = InteractionController::new(MatrixShape::new(3, 3));
    let full = gesture::brush_end(&mut c, Some(BrushExtent::new([0.0, 0.0], [3.0, 3.0])), 300.0, 300.0);
    assert_eq!(full.scale, [1.0, 1.0]);
    assert_eq!(full.translate, [0.0, 0.0]);

    let part = gesture::brush_end(&mut c, Some(BrushExtent::new([1.0, 1.0], [3.0, 3.0])), 300.0, 300.0);
    assert_eq!(part.scale, [1.5, 1.5]);
    assert_eq!(part.translate, [-150.0, -150.0]);
}

#[derive(Debug, Clone, Copy)]
enum Gesture {
    Row(usize),
    Col(usize),
    Cell(usize, usize),
    Brush([f64; 2], [f64; 2]),
    Clear,
}

fn gesture_strategy() -> impl Strategy<Value = Gesture> {
    prop_oneof![
        (0usize..4).prop_map(Gesture::Row),
        (0usize..4).prop_map(Gesture::Col),
        (0usize..4, 0usize..4).prop_map(|(r, c)| Gesture::Cell(r, c)),
        ([-1.0f64..5.0, -1.0f64..5.0], [-1.0f64..5.0, -1.0f64..5.0])
            .prop_map(|(a, b)| Gesture::Brush(a, b)),
        Just(Gesture::Clear),
    ]
}

proptest! {
    #[test]
    fn gestures_match_reference_model(gestures in proptest::collection::vec(gesture_strategy(), 0..40)) {
        let shape = MatrixShape::new(4, 4);
        let mut c = InteractionController::new(shape);
        let mirror = Rc::new(RefCell::new(Highlight::NONE));
        let sink = mirror.clone();
        c.on(EventKind::Highlight, move |e| {
            if let InteractionEvent::Highlight(h) = e {
                *sink.borrow_mut() = *h;
            }
        });

        let mut model = Highlight::NONE;
        for g in gestures {
            match g {
                Gesture::Row(r) => {
                    model = if model.row == Some(r) { Highlight::NONE } else { Highlight::row(r) };
                    gesture::toggle_row_highlight(&mut c, r);
                }
                Gesture::Col(col) => {
                    model = if model.col == Some(col) { Highlight::NONE } else { Highlight::col(col) };
                    gesture::toggle_col_highlight(&mut c, col);
                }
                Gesture::Cell(r, col) => {
                    let hit = Highlight::cell(r, col);
                    model = if model == hit { Highlight::NONE } else { hit };
                    gesture::toggle_cell_highlight(&mut c, r, col);
                }
                Gesture::Brush(a, b) => {
                    let t = gesture::brush_end(&mut c, Some(BrushExtent::new(a, b)), 400.0, 400.0);
                    prop_assert!(t.visible_cols().end <= shape.cols);
                    prop_assert!(t.visible_rows().end <= shape.rows);
                    prop_assert!(!t.extent.is_empty());
                }
                Gesture::Clear => {
                    model = Highlight::NONE;
                    gesture::click_empty_canvas(&mut c);
                    prop_assert!(c.transform().is_identity());
                }
            }
            prop_assert_eq!(c.highlight(), model);
            prop_assert_eq!(*mirror.borrow(), model);
        }
    }

    #[test]
    fn double_toggle_is_identity(start in proptest::option::of(0usize..5), row in 0usize..5) {
        let mut c = InteractionController::new(MatrixShape::new(5, 5));
        if let Some(r) = start {
            c.set_highlight(Highlight::row(r));
        }
        let before = c.highlight();
        gesture::toggle_row_highlight(&mut c, row);
        gesture::toggle_row_highlight(&mut c, row);
        match start {
            None => prop_assert_eq!(c.highlight(), before),
            Some(r) if r == row => prop_assert_eq!(c.highlight(), before),
            // A different row is replaced by the first click.
            Some(_) => prop_assert_eq!(c.highlight(), Highlight::NONE),
        }
    }
}
