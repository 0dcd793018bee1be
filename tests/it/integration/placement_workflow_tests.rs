//! Placement workflows: inverse transform, bounds validation, bridge
//! materialization, deletion.

use kurbo::Point;
use serde_json::json;

use planmark::{CanvasError, PointerResponse};

use crate::helpers::{TestCanvasBuilder, element_rect};

#[test]
fn test_placement_inverts_transform_before_creating() {
    let mut canvas = TestCanvasBuilder::new()
        .with_scale(0.5)
        .with_translate(-1000.0, -1200.0)
        .build();

    let id = canvas
        .place_marker(Point::new(400.0, 300.0), element_rect(), json!({"label": "hydrant"}))
        .unwrap()
        .expect("inside the content box");

    let created = &canvas.bridge().created;
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].position(), Point::new(2800.0, 3000.0));
    assert_eq!(canvas.marker(id).unwrap().label, "hydrant");
}

#[test]
fn test_out_of_bounds_placement_silently_dropped() {
    let mut canvas = TestCanvasBuilder::new().build();

    // (7000, 3000) falls outside the 6000 content box on x.
    let placed = canvas
        .place_marker(Point::new(7000.0, 3000.0), element_rect(), json!({}))
        .unwrap();
    assert!(placed.is_none());
    assert!(canvas.bridge().created.is_empty());
    assert!(canvas.markers().is_empty());
}

#[test]
fn test_box_boundary_is_inclusive() {
    let mut canvas = TestCanvasBuilder::new().build();
    let placed = canvas
        .place_marker(Point::new(6000.0, 0.0), element_rect(), json!({}))
        .unwrap();
    assert!(placed.is_some());
}

#[test]
fn test_negative_coordinates_rejected() {
    let mut canvas = TestCanvasBuilder::new()
        .with_translate(200.0, 200.0)
        .build();
    // Screen (100, 300) maps to content (-100, 100).
    let placed = canvas
        .place_marker(Point::new(100.0, 300.0), element_rect(), json!({}))
        .unwrap();
    assert!(placed.is_none());
    assert!(canvas.bridge().created.is_empty());
}

#[test]
fn test_bridge_create_failure_surfaces_as_error() {
    let mut canvas = TestCanvasBuilder::new().with_failing_create().build();
    let err = canvas
        .place_marker(Point::new(100.0, 100.0), element_rect(), json!({}))
        .unwrap_err();
    assert!(matches!(err, CanvasError::CreateFailed(_)));
    assert!(canvas.markers().is_empty());
}

#[test]
fn test_placed_marker_is_immediately_draggable() {
    let mut canvas = TestCanvasBuilder::new().build();
    let id = canvas
        .place_marker(Point::new(250.0, 250.0), element_rect(), json!({}))
        .unwrap()
        .expect("in bounds");

    assert_eq!(
        canvas.pointer_down(Point::new(250.0, 250.0), element_rect()),
        PointerResponse::DragStarted(id)
    );
    canvas.pointer_move(Point::new(300.0, 250.0));
    canvas.pointer_up().unwrap();
    assert_eq!(canvas.bridge().commits[0], (id, 300, 250));
}

#[test]
fn test_delete_removes_marker_from_cache_and_hit_index() {
    let mut canvas = TestCanvasBuilder::new()
        .with_marker("pump", 500.0, 500.0)
        .build();
    let id = canvas.markers()[0].id;

    canvas.toggle_selected(id);
    canvas.delete_marker(id).unwrap();

    assert_eq!(canvas.bridge().deleted, vec![id]);
    assert!(canvas.markers().is_empty());
    assert!(canvas.selected().is_empty());
    assert_eq!(
        canvas.pointer_down(Point::new(500.0, 500.0), element_rect()),
        PointerResponse::Ignored
    );
}

#[test]
fn test_delete_unknown_marker_is_an_error() {
    let mut canvas = TestCanvasBuilder::new().build();
    let ghost = crate::helpers::marker("ghost", 0.0, 0.0).id;
    let err = canvas.delete_marker(ghost).unwrap_err();
    assert!(matches!(err, CanvasError::MarkerNotFound(id) if id == ghost));
}
