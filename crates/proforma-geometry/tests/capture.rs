use proforma_geometry::{serialize_path, Area, Capture, CaptureMode, Point, Surface};

fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
    raw.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

#[test]
fn freehand_capture_serializes_to_closed_path() {
    let mut capture = Capture::begin(CaptureMode::Freehand, Point::new(10.0, 10.0));
    for p in pts(&[(50.0, 10.0), (50.0, 50.0), (10.0, 50.0)]) {
        capture.extend(p);
    }

    let area = Area::new(capture.finish().expect("four points should commit"));
    assert_eq!(area.svg_path(), "M 10 10 L 50 10 L 50 50 L 10 50 Z");
}

#[test]
fn freehand_skips_points_closer_than_threshold() {
    let mut capture = Capture::begin(CaptureMode::Freehand, Point::new(10.0, 10.0));
    capture.extend(Point::new(10.5, 10.0));
    capture.extend(Point::new(10.2, 10.4));
    assert_eq!(capture.points().len(), 1);

    capture.extend(Point::new(12.0, 10.0));
    assert_eq!(capture.points(), pts(&[(10.0, 10.0), (12.0, 10.0)]).as_slice());
}

#[test]
fn rectangle_capture_recomputes_corners() {
    let mut capture = Capture::begin(CaptureMode::Rectangle, Point::new(20.0, 20.0));
    capture.extend(Point::new(40.0, 90.0));
    capture.extend(Point::new(80.0, 60.0));

    let points = capture.finish().expect("rectangle should commit");
    assert_eq!(
        points,
        pts(&[(20.0, 20.0), (80.0, 20.0), (80.0, 60.0), (20.0, 60.0)])
    );
    assert_eq!(serialize_path(&points), "M 20 20 L 80 20 L 80 60 L 20 60 Z");
}

#[test]
fn rectangle_dragged_up_and_left_still_starts_at_min_corner() {
    let mut capture = Capture::begin(CaptureMode::Rectangle, Point::new(80.0, 60.0));
    capture.extend(Point::new(20.0, 20.0));

    assert_eq!(
        capture.points(),
        pts(&[(20.0, 20.0), (80.0, 20.0), (80.0, 60.0), (20.0, 60.0)]).as_slice()
    );
}

#[test]
fn single_click_is_discarded() {
    let capture = Capture::begin(CaptureMode::Freehand, Point::new(30.0, 30.0));
    assert!(capture.finish().is_none());
}

#[test]
fn flat_rectangle_is_discarded() {
    let mut capture = Capture::begin(CaptureMode::Rectangle, Point::new(30.0, 30.0));
    capture.extend(Point::new(60.0, 30.0));
    assert_eq!(capture.points().len(), 4);
    assert!(capture.finish().is_none());
}

#[test]
fn empty_path_serializes_to_nothing() {
    assert_eq!(serialize_path(&[]), "");
}

#[test]
fn fractional_coordinates_are_kept() {
    assert_eq!(
        serialize_path(&pts(&[(12.5, 0.0), (100.0, 33.25)])),
        "M 12.5 0 L 100 33.25 Z"
    );
}

#[test]
fn normalize_maps_pixels_to_percent_and_clamps() {
    let surface = Surface::new(100.0, 50.0, 400.0, 200.0);

    assert_eq!(surface.normalize(300.0, 150.0).unwrap(), Point::new(50.0, 50.0));
    assert_eq!(surface.normalize(0.0, 0.0).unwrap(), Point::new(0.0, 0.0));
    assert_eq!(surface.normalize(900.0, 400.0).unwrap(), Point::new(100.0, 100.0));
}

#[test]
fn normalize_rejects_empty_surface() {
    let surface = Surface::new(0.0, 0.0, 0.0, 120.0);
    assert!(surface.normalize(10.0, 10.0).is_err());
}
