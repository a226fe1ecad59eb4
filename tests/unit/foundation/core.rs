use super::*;

#[test]
fn wide_source_is_downscaled_to_max_width() {
    let c = Canvas::fit(1600, 1200, MAX_CANVAS_WIDTH).unwrap();
    assert_eq!(
        c,
        Canvas {
            width: 800,
            height: 600
        }
    );
    assert!((c.scale_from(1600) - 0.5).abs() < 1e-12);
}

#[test]
fn narrow_source_is_never_upscaled() {
    let c = Canvas::fit(400, 300, MAX_CANVAS_WIDTH).unwrap();
    assert_eq!(
        c,
        Canvas {
            width: 400,
            height: 300
        }
    );
    assert_eq!(c.scale_from(400), 1.0);
}

#[test]
fn source_at_exact_max_width_is_unchanged() {
    let c = Canvas::fit(800, 600, MAX_CANVAS_WIDTH).unwrap();
    assert_eq!((c.width, c.height), (800, 600));
    assert_eq!(c.center_x(), 400.0);
}

#[test]
fn extreme_aspect_keeps_at_least_one_row() {
    let c = Canvas::fit(10_000, 3, MAX_CANVAS_WIDTH).unwrap();
    assert_eq!(c.width, 800);
    assert_eq!(c.height, 1);
}

#[test]
fn zero_dimensions_are_rejected() {
    assert!(Canvas::fit(0, 10, MAX_CANVAS_WIDTH).is_err());
    assert!(Canvas::fit(10, 0, MAX_CANVAS_WIDTH).is_err());
    assert!(Canvas::fit(10, 10, 0).is_err());
}

#[test]
fn hex_formatting() {
    assert_eq!(Rgba8::WHITE.to_hex(), "#FFFFFF");
    assert_eq!(
        Rgba8 {
            r: 1,
            g: 2,
            b: 3,
            a: 4
        }
        .to_hex(),
        "#01020304"
    );
}
