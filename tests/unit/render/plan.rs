use super::*;

fn mono24(s: &str) -> f32 {
    s.chars().count() as f32 * 24.0
}

fn assert_ys(got: Vec<f32>, want: &[f32]) {
    assert_eq!(got.len(), want.len(), "{got:?} vs {want:?}");
    for (g, w) in got.iter().zip(want) {
        assert!((g - w).abs() < 1e-3, "{got:?} vs {want:?}");
    }
}

fn friday_config() -> MemeConfig {
    MemeConfig::default().with_captions("WHEN YOU", "SHIP ON FRIDAY")
}

#[test]
fn end_to_end_geometry_for_800x600() {
    let plan = plan_composition(
        800,
        600,
        &friday_config(),
        &mut mono24,
        &CompositorOpts::default(),
    )
    .unwrap();

    assert_eq!(
        plan.canvas,
        Canvas {
            width: 800,
            height: 600
        }
    );
    assert_eq!(plan.scale, 1.0);
    assert_eq!(plan.center_x, 400.0);
    assert_eq!(plan.style.stroke_width, 5.0);
    assert_eq!(plan.style.fill, Rgba8::WHITE);
    assert_eq!(plan.style.stroke, Rgba8::BLACK);

    let top = plan.top.as_ref().unwrap();
    assert_eq!(top.anchor, Anchor::Top);
    assert_eq!(top.lines, vec!["WHEN YOU ".to_string()]);
    assert_eq!(top.line_y(0), 20.0);

    let bottom = plan.bottom.as_ref().unwrap();
    assert_eq!(bottom.anchor, Anchor::Bottom);
    assert_eq!(bottom.lines, vec!["SHIP ON FRIDAY ".to_string()]);
    assert_eq!(*bottom.line_ys().last().unwrap(), 580.0);
    assert_eq!(plan.blocks().count(), 2);
}

#[test]
fn captions_are_uppercased_before_wrapping() {
    let config = MemeConfig::default().with_captions("when you", "");
    let plan = plan_composition(800, 600, &config, &mut mono24, &CompositorOpts::default()).unwrap();
    assert_eq!(plan.top.unwrap().lines, vec!["WHEN YOU ".to_string()]);
    assert!(plan.bottom.is_none());
}

#[test]
fn narrow_canvas_wraps_bottom_caption_upward() {
    // 200px canvas leaves 160px per line: "SHIP ON " (192px) no longer fits.
    let plan = plan_composition(
        200,
        600,
        &friday_config(),
        &mut mono24,
        &CompositorOpts::default(),
    )
    .unwrap();
    let bottom = plan.bottom.unwrap();
    assert_eq!(
        bottom.lines,
        vec!["SHIP ".to_string(), "ON ".to_string(), "FRIDAY ".to_string()]
    );
    assert_ys(bottom.line_ys(), &[484.0, 532.0, 580.0]);
}

#[test]
fn wide_source_is_planned_at_max_width() {
    let plan = plan_composition(
        1600,
        1200,
        &friday_config(),
        &mut mono24,
        &CompositorOpts::default(),
    )
    .unwrap();
    assert_eq!((plan.canvas.width, plan.canvas.height), (800, 600));
    assert_eq!(plan.scale, 0.5);
    assert_eq!(plan.bottom.unwrap().start_y, 580.0);
}

#[test]
fn empty_captions_never_measure() {
    let mut measure = |_: &str| -> f32 { panic!("measured an empty caption") };
    let plan = plan_composition(
        640,
        480,
        &MemeConfig::default(),
        &mut measure,
        &CompositorOpts::default(),
    )
    .unwrap();
    assert!(plan.top.is_none());
    assert!(plan.bottom.is_none());
    assert_eq!(plan.blocks().count(), 0);
}

#[test]
fn line_height_follows_font_size() {
    let config = friday_config().with_font_size(50.0);
    let plan = plan_composition(800, 600, &config, &mut mono24, &CompositorOpts::default()).unwrap();
    assert!((plan.top.unwrap().line_height - 60.0).abs() < 1e-3);
    assert_eq!(plan.style.stroke_width, 6.25);
}

#[test]
fn invalid_config_is_rejected_before_layout() {
    let config = friday_config().with_font_size(5.0);
    assert!(plan_composition(800, 600, &config, &mut mono24, &CompositorOpts::default()).is_err());
}
