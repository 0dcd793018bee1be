//! Drag gesture workflows: preview math, commit discipline, rollback.

use anyhow::anyhow;
use kurbo::Point;

use planmark::{CanvasError, PointerResponse};

use crate::helpers::{TestCanvasBuilder, element_rect, screen_at};

#[test]
fn test_fifty_moves_produce_exactly_one_commit() {
    let mut canvas = TestCanvasBuilder::new()
        .with_marker("pump", 500.0, 500.0)
        .build();
    let id = canvas.markers()[0].id;

    let down = screen_at(&canvas, Point::new(500.0, 500.0));
    assert_eq!(
        canvas.pointer_down(down, element_rect()),
        PointerResponse::DragStarted(id)
    );
    for step in 1..=50 {
        let t = step as f64;
        canvas.pointer_move(Point::new(down.x + t, down.y + t * 0.6));
    }
    assert_eq!(
        canvas.pointer_up().unwrap(),
        PointerResponse::Committed(id)
    );

    let commits = &canvas.bridge().commits;
    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0], (id, 550, 530));
    assert_eq!(canvas.marker(id).unwrap().position(), Point::new(550.0, 530.0));
    assert!(!canvas.is_dragging());
}

#[test]
fn test_drag_preview_divides_screen_delta_by_scale() {
    let mut canvas = TestCanvasBuilder::new()
        .with_marker("pump", 500.0, 500.0)
        .with_scale(2.0)
        .build();
    let id = canvas.markers()[0].id;

    let down = screen_at(&canvas, Point::new(500.0, 500.0));
    canvas.pointer_down(down, element_rect());
    let preview = canvas
        .pointer_move(Point::new(down.x + 50.0, down.y + 30.0))
        .unwrap();
    assert_eq!(preview, Point::new(525.0, 515.0));

    canvas.pointer_up().unwrap();
    assert_eq!(canvas.bridge().commits[0], (id, 525, 515));
}

#[test]
fn test_preview_clamped_at_content_origin() {
    let mut canvas = TestCanvasBuilder::new().with_marker("pump", 5.0, 5.0).build();
    let id = canvas.markers()[0].id;

    let down = screen_at(&canvas, Point::new(5.0, 5.0));
    canvas.pointer_down(down, element_rect());
    let preview = canvas.pointer_move(Point::new(down.x - 100.0, down.y - 100.0)).unwrap();
    assert_eq!(preview, Point::new(0.0, 0.0));

    canvas.pointer_up().unwrap();
    assert_eq!(canvas.bridge().commits[0], (id, 0, 0));
}

#[test]
fn test_commit_rounds_to_nearest_integer() {
    let mut canvas = TestCanvasBuilder::new()
        .with_marker("pump", 100.0, 100.0)
        .build();
    let id = canvas.markers()[0].id;

    let down = screen_at(&canvas, Point::new(100.0, 100.0));
    canvas.pointer_down(down, element_rect());
    canvas.pointer_move(Point::new(down.x + 3.4, down.y + 2.6));
    canvas.pointer_up().unwrap();
    assert_eq!(canvas.bridge().commits[0], (id, 103, 103));
}

#[test]
fn test_release_below_threshold_is_a_click_and_never_commits() {
    let mut canvas = TestCanvasBuilder::new()
        .with_marker("pump", 500.0, 500.0)
        .build();
    let id = canvas.markers()[0].id;

    let down = screen_at(&canvas, Point::new(500.0, 500.0));
    canvas.pointer_down(down, element_rect());
    canvas.pointer_move(Point::new(down.x + 1.0, down.y + 1.0));
    assert_eq!(canvas.pointer_up().unwrap(), PointerResponse::Clicked(id));

    assert!(canvas.bridge().commits.is_empty());
    assert!(canvas.selected().contains(&id));
    assert_eq!(canvas.marker(id).unwrap().position(), Point::new(500.0, 500.0));

    // Clicking the same marker again toggles the selection off.
    canvas.pointer_down(down, element_rect());
    canvas.pointer_up().unwrap();
    assert!(!canvas.selected().contains(&id));
}

#[test]
fn test_second_pointer_down_during_session_is_ignored() {
    let mut canvas = TestCanvasBuilder::new()
        .with_marker("pump", 500.0, 500.0)
        .with_marker("valve", 900.0, 900.0)
        .build();
    let id = canvas.markers()[0].id;

    let down = screen_at(&canvas, Point::new(500.0, 500.0));
    canvas.pointer_down(down, element_rect());
    canvas.pointer_move(Point::new(down.x + 40.0, down.y));

    let second = screen_at(&canvas, Point::new(900.0, 900.0));
    assert_eq!(
        canvas.pointer_down(second, element_rect()),
        PointerResponse::Ignored
    );
    assert!(canvas.is_dragging());

    // The original session finishes normally.
    assert_eq!(canvas.pointer_up().unwrap(), PointerResponse::Committed(id));
    assert_eq!(canvas.bridge().commits[0], (id, 540, 500));
}

#[test]
fn test_pointer_leave_ends_gesture_like_release() {
    let mut canvas = TestCanvasBuilder::new()
        .with_marker("pump", 500.0, 500.0)
        .build();
    let id = canvas.markers()[0].id;

    let down = screen_at(&canvas, Point::new(500.0, 500.0));
    canvas.pointer_down(down, element_rect());
    canvas.pointer_move(Point::new(down.x + 20.0, down.y + 10.0));
    assert_eq!(canvas.pointer_leave().unwrap(), PointerResponse::Committed(id));
    assert_eq!(canvas.bridge().commits[0], (id, 520, 510));
    assert!(!canvas.is_dragging());
}

#[test]
fn test_pointer_down_misses_when_nothing_in_hit_radius() {
    let mut canvas = TestCanvasBuilder::new()
        .with_marker("pump", 500.0, 500.0)
        .build();
    let miss = screen_at(&canvas, Point::new(530.0, 500.0));
    assert_eq!(
        canvas.pointer_down(miss, element_rect()),
        PointerResponse::Ignored
    );
    assert!(!canvas.is_dragging());
}

#[test]
fn test_commit_failure_at_issue_time_rolls_back() {
    let mut canvas = TestCanvasBuilder::new()
        .with_marker("pump", 500.0, 500.0)
        .with_failing_commit()
        .build();
    let id = canvas.markers()[0].id;

    let down = screen_at(&canvas, Point::new(500.0, 500.0));
    canvas.pointer_down(down, element_rect());
    canvas.pointer_move(Point::new(down.x + 50.0, down.y + 30.0));
    let err = canvas.pointer_up().unwrap_err();
    assert!(err.is_retryable());
    match &err {
        CanvasError::CommitFailed { marker, .. } => assert_eq!(*marker, id),
        other => panic!("unexpected error: {other}"),
    }

    // The failed attempt reached the bridge once, and the displayed
    // position snapped back to the last committed value.
    assert_eq!(canvas.bridge().commits.len(), 1);
    assert_eq!(canvas.marker(id).unwrap().position(), Point::new(500.0, 500.0));
    assert!(!canvas.is_dragging());
}

#[test]
fn test_deferred_commit_failure_rolls_back() {
    let mut canvas = TestCanvasBuilder::new()
        .with_marker("pump", 500.0, 500.0)
        .build();
    let id = canvas.markers()[0].id;

    let down = screen_at(&canvas, Point::new(500.0, 500.0));
    canvas.pointer_down(down, element_rect());
    canvas.pointer_move(Point::new(down.x + 50.0, down.y + 30.0));
    canvas.pointer_up().unwrap();
    assert_eq!(canvas.marker(id).unwrap().position(), Point::new(550.0, 530.0));

    // A resolution for some other marker is discarded without touching
    // the pending commit.
    let unrelated = crate::helpers::marker("ghost", 0.0, 0.0).id;
    canvas
        .commit_resolved(unrelated, Err(anyhow!("stale")))
        .unwrap();
    assert_eq!(canvas.marker(id).unwrap().position(), Point::new(550.0, 530.0));

    let err = canvas.commit_resolved(id, Err(anyhow!("write lost"))).unwrap_err();
    assert!(matches!(err, CanvasError::CommitFailed { marker, .. } if marker == id));
    assert_eq!(canvas.marker(id).unwrap().position(), Point::new(500.0, 500.0));
}

#[test]
fn test_deferred_commit_success_keeps_position() {
    let mut canvas = TestCanvasBuilder::new()
        .with_marker("pump", 500.0, 500.0)
        .build();
    let id = canvas.markers()[0].id;

    let down = screen_at(&canvas, Point::new(500.0, 500.0));
    canvas.pointer_down(down, element_rect());
    canvas.pointer_move(Point::new(down.x + 10.0, down.y));
    canvas.pointer_up().unwrap();

    canvas.commit_resolved(id, Ok(())).unwrap();
    assert_eq!(canvas.marker(id).unwrap().position(), Point::new(510.0, 500.0));

    // A late second resolution has nothing pending and is a no-op.
    canvas.commit_resolved(id, Err(anyhow!("duplicate ack"))).unwrap();
    assert_eq!(canvas.marker(id).unwrap().position(), Point::new(510.0, 500.0));
}

#[test]
fn test_committed_marker_draggable_again_from_new_position() {
    let mut canvas = TestCanvasBuilder::new()
        .with_marker("pump", 500.0, 500.0)
        .build();
    let id = canvas.markers()[0].id;

    let down = screen_at(&canvas, Point::new(500.0, 500.0));
    canvas.pointer_down(down, element_rect());
    canvas.pointer_move(Point::new(down.x + 50.0, down.y + 30.0));
    canvas.pointer_up().unwrap();

    // The hit index follows the commit: the old position misses, the new
    // position hits.
    assert_eq!(
        canvas.pointer_down(down, element_rect()),
        PointerResponse::Ignored
    );
    let again = screen_at(&canvas, Point::new(550.0, 530.0));
    assert_eq!(
        canvas.pointer_down(again, element_rect()),
        PointerResponse::DragStarted(id)
    );
}
