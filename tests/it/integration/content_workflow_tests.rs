//! Content load workflows through the canvas: supersession, timeout
//! fallback, and how the resolved descriptor constrains placement.

use std::time::{Duration, Instant};

use kurbo::{Point, Size};
use serde_json::json;

use planmark::content::{ContentMode, LoadKind};
use planmark::types::{ContentSource, RenderPolicy};

use crate::helpers::{TestCanvasBuilder, element_rect};

#[test]
fn test_newer_request_supersedes_in_flight_load() {
    let mut canvas = TestCanvasBuilder::new().build();
    let now = Instant::now();

    let photo = ContentSource::new("plans/site.jpg");
    let stale = canvas.request_content(Some(&photo), now).expect("ticket");
    assert_eq!(stale.kind(), LoadKind::Raster);

    let document = ContentSource::new("plans/site.pdf");
    let current = canvas.request_content(Some(&document), now).expect("ticket");
    assert_eq!(current.kind(), LoadKind::Vector);

    // The raster decode finishing late must not clobber the newer load.
    assert!(!canvas.content_mut().resolve_raster(stale, Size::new(3000.0, 2000.0)));
    assert!(canvas.content().is_loading());

    assert!(canvas.content_mut().resolve_vector(
        current,
        Size::new(850.0, 1100.0),
        0,
        5,
        RenderPolicy::HighRes,
    ));
    assert_eq!(canvas.content().descriptor().mode, ContentMode::Vector);
    assert_eq!(canvas.content().descriptor().render.width, 6000.0);
}

#[test]
fn test_timeout_falls_back_and_markers_stay_placeable() {
    let mut canvas = TestCanvasBuilder::new().build();
    let start = Instant::now();

    canvas
        .request_content(Some(&ContentSource::new("plans/slow.jpg")), start)
        .expect("ticket");
    assert!(!canvas.content_mut().check_timeout(start + Duration::from_secs(9)));
    assert!(canvas.content_mut().check_timeout(start + Duration::from_secs(11)));

    // Fallback is an 800x600 raster box: placement works inside it and is
    // rejected outside it.
    let inside = canvas
        .place_marker(Point::new(100.0, 100.0), element_rect(), json!({}))
        .unwrap();
    assert!(inside.is_some());
    let outside = canvas
        .place_marker(Point::new(900.0, 100.0), element_rect(), json!({}))
        .unwrap();
    assert!(outside.is_none());
}

#[test]
fn test_raster_descriptor_constrains_placement_to_render_size() {
    let mut canvas = TestCanvasBuilder::new().build();
    let ticket = canvas
        .request_content(Some(&ContentSource::new("plans/site.jpg")), Instant::now())
        .expect("ticket");
    assert!(canvas.content_mut().resolve_raster(ticket, Size::new(3200.0, 2400.0)));

    // 3200x2400 fits to 1600x1200.
    let inside = canvas
        .place_marker(Point::new(1500.0, 1100.0), element_rect(), json!({}))
        .unwrap();
    assert!(inside.is_some());
    let outside = canvas
        .place_marker(Point::new(1700.0, 100.0), element_rect(), json!({}))
        .unwrap();
    assert!(outside.is_none());
}

#[test]
fn test_clearing_source_returns_to_empty_box() {
    let mut canvas = TestCanvasBuilder::new().build();
    let now = Instant::now();
    let ticket = canvas
        .request_content(Some(&ContentSource::new("plans/site.jpg")), now)
        .expect("ticket");
    assert!(canvas.content_mut().resolve_raster(ticket, Size::new(800.0, 600.0)));

    assert!(canvas.request_content(None, now).is_none());
    assert_eq!(canvas.content().descriptor().mode, ContentMode::Empty);

    // Back in the 6000 box, a point outside any raster is valid again.
    let placed = canvas
        .place_marker(Point::new(4000.0, 4000.0), element_rect(), json!({}))
        .unwrap();
    assert!(placed.is_some());
}

#[test]
fn test_reset_view_follows_active_descriptor() {
    let mut canvas = TestCanvasBuilder::new().with_scale(3.0).build();
    let ticket = canvas
        .request_content(Some(&ContentSource::new("plans/site.jpg")), Instant::now())
        .expect("ticket");
    assert!(canvas.content_mut().resolve_raster(ticket, Size::new(1600.0, 1200.0)));

    canvas.reset_view(Size::new(800.0, 600.0));
    assert_eq!(canvas.viewport().scale(), 1.0);
    assert_eq!(canvas.viewport().translate().x, -400.0);
    assert_eq!(canvas.viewport().translate().y, -300.0);
}
