//! End-to-end behaviour of the tracing controller.

use kurbo::Point;
use lettertrace_core::{
    CaptureState, GestureEvent, LetterSource, SourceKind, TracingConfig, TracingController,
};
use std::sync::Arc;
use std::thread;

const EPS: f64 = 1e-6;

fn controller(glyph: &str) -> TracingController {
    TracingController::new(glyph, TracingConfig::default())
}

#[test]
fn circle_glyph_is_centered_without_scaling() {
    let controller = controller("O");
    let glyph = controller.glyph_path();

    assert_eq!(controller.resolved_from(), Some(SourceKind::Markup));
    assert!((glyph.scale - 1.0).abs() < EPS);

    // Authored box [120, 200, 160, 160] moves to the canvas center.
    assert!((glyph.source_bounds.x0 - 120.0).abs() < EPS);
    assert!((glyph.source_bounds.y0 - 200.0).abs() < EPS);
    assert!((glyph.bounds.width() - 160.0).abs() < EPS);
    assert!((glyph.bounds.height() - 160.0).abs() < EPS);
    assert!((glyph.bounds.x0 - 100.0).abs() < EPS);
    assert!((glyph.bounds.y0 - 100.0).abs() < EPS);
    assert!((glyph.bounds.center() - Point::new(180.0, 180.0)).hypot() < EPS);
}

#[test]
fn every_builtin_glyph_fits_the_canvas() {
    let config = TracingConfig {
        canvas_size: 120.0,
        ..TracingConfig::default()
    };
    let available = config.canvas_size * (1.0 - 2.0 * config.padding_ratio);
    let mut controller = TracingController::new("A", config);

    let ids: Vec<String> = controller.repository().ids().map(str::to_string).collect();
    for id in ids {
        controller.set_letter_path(id.as_str());
        let glyph = controller.glyph_path();
        assert!(!glyph.is_empty(), "{id} is empty");
        assert!(glyph.scale <= 1.0);
        assert!(glyph.bounds.width() <= available + EPS, "{id} too wide");
        assert!(glyph.bounds.height() <= available + EPS, "{id} too tall");
        assert!((glyph.bounds.center() - Point::new(60.0, 60.0)).hypot() < EPS, "{id} off center");
    }
}

#[test]
fn stroke_keeps_gesture_order() {
    let mut controller = controller("A");
    for event in [
        GestureEvent::begin(5.0, 5.0),
        GestureEvent::move_to(10.0, 5.0),
        GestureEvent::move_to(10.0, 10.0),
        GestureEvent::End,
    ] {
        controller.handle_gesture(event);
    }

    let snapshot = controller.get_drawing_path();
    let points: Vec<(f64, f64)> = snapshot.path.iter().map(|s| (s.x, s.y)).collect();
    assert_eq!(points, vec![(5.0, 5.0), (10.0, 5.0), (10.0, 10.0)]);
    assert!(snapshot.path.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
}

#[test]
fn snapshot_is_available_mid_gesture() {
    let mut controller = controller("A");
    controller.begin(Point::new(1.0, 1.0));
    controller.move_to(Point::new(2.0, 1.0));

    assert_eq!(controller.get_drawing_path().len(), 2);
    assert_eq!(controller.state(), CaptureState::Drawing);
}

#[test]
fn reset_and_clear_are_idempotent() {
    let mut controller = controller("A");
    controller.begin(Point::new(1.0, 1.0));
    controller.move_to(Point::new(2.0, 2.0));

    for _ in 0..3 {
        controller.reset_drawing();
        assert!(controller.get_drawing_path().is_empty());
    }
    for _ in 0..3 {
        controller.clear_drawing();
        assert!(controller.get_drawing_path().is_empty());
    }
}

#[test]
fn glyph_swap_preserves_ink() {
    let mut controller = controller("A");
    controller.begin(Point::new(30.0, 40.0));
    controller.move_to(Point::new(35.0, 45.0));
    let before = controller.get_drawing_path().path;
    let outline_a = controller.glyph_path().clone();

    controller.set_letter_path("B");

    assert_eq!(controller.get_drawing_path().path, before);
    assert_eq!(controller.glyph_id(), "B");
    assert_ne!(controller.glyph_path().path, outline_a.path);
    // The gesture is still live after the swap.
    assert_eq!(controller.state(), CaptureState::Drawing);
}

#[test]
fn reset_discards_long_gesture() {
    let mut controller = controller("A");
    controller.begin(Point::new(0.0, 0.0));
    for i in 1..50 {
        let t = i as f64 / 49.0 * 360.0;
        controller.move_to(Point::new(t, t));
    }
    controller.end();
    assert_eq!(controller.get_drawing_path().len(), 50);

    controller.reset_drawing();

    controller.begin(Point::new(100.0, 100.0));
    controller.move_to(Point::new(110.0, 100.0));
    controller.move_to(Point::new(120.0, 100.0));
    controller.end();

    let snapshot = controller.get_drawing_path();
    assert_eq!(snapshot.len(), 3);
    assert_eq!(snapshot.path[0].x, 100.0);
    assert_eq!(snapshot.path[2].x, 120.0);
}

#[test]
fn cancelled_gesture_keeps_partial_stroke() {
    let mut controller = controller("A");
    controller.begin(Point::new(0.0, 0.0));
    controller.move_to(Point::new(400.0, 400.0));
    controller.cancel();

    assert_eq!(controller.state(), CaptureState::Idle);
    assert_eq!(controller.get_drawing_path().len(), 2);
}

#[test]
fn custom_markup_glyph() {
    let mut controller = controller("A");
    controller.set_letter_path(LetterSource::markup(
        r#"<svg viewBox="0 0 400 400"><circle cx="200" cy="200" r="500"/></svg>"#,
    ));
    let glyph = controller.glyph_path();
    // Large arcs are approximated by cubics, so allow a little slack.
    assert!((glyph.scale - 288.0 / 1000.0).abs() < 1e-3);
    assert!(glyph.bounds.height() <= 288.0 + EPS);
}

#[test]
fn shared_controller_never_exposes_torn_strokes() {
    let shared = controller("A").into_shared();

    let writer = {
        let shared = Arc::clone(&shared);
        thread::spawn(move || {
            for round in 0..20 {
                if let Ok(mut controller) = shared.lock() {
                    controller.begin(Point::new(round as f64, 0.0));
                }
                for i in 1..25 {
                    if let Ok(mut controller) = shared.lock() {
                        controller.move_to(Point::new(round as f64, i as f64));
                    }
                }
                if let Ok(mut controller) = shared.lock() {
                    controller.end();
                }
            }
        })
    };

    for _ in 0..200 {
        let controller = shared.lock().unwrap();
        let stroke = controller.stroke();
        let snapshot = controller.get_drawing_path();
        assert_eq!(snapshot.len(), stroke.len());
        // Every sample of one stroke belongs to the same round.
        if let Some(first) = snapshot.path.first() {
            assert!(snapshot.path.iter().all(|s| s.x == first.x));
        }
    }

    writer.join().unwrap();
    assert_eq!(shared.lock().unwrap().get_drawing_path().len(), 25);
}
