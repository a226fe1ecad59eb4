use super::*;

fn canvas(width: u32, height: u32, px: [u8; 4]) -> RenderedCanvas {
    RenderedCanvas {
        width,
        height,
        rgba8_premul: px.repeat(width as usize * height as usize),
    }
}

#[test]
fn png_has_canvas_dimensions_and_pixels() {
    let bytes = export_png(&canvas(17, 9, [200, 10, 60, 255])).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

    let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (17, 9));
    assert_eq!(img.get_pixel(16, 8).0, [200, 10, 60, 255]);
}

#[test]
fn png_unpremultiplies_translucent_pixels() {
    // 50% red, premultiplied.
    let bytes = export_png(&canvas(2, 2, [128, 0, 0, 128])).unwrap();
    let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
    let [r, g, b, a] = img.get_pixel(0, 0).0;
    assert_eq!(a, 128);
    assert!(r >= 254, "r = {r}");
    assert_eq!((g, b), (0, 0));
}

#[test]
fn jpeg_is_opaque_rgb() {
    let bytes = export(&canvas(16, 16, [0, 0, 0, 0]), ExportFormat::Jpeg).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);

    let img = image::load_from_memory(&bytes).unwrap();
    assert_eq!((img.width(), img.height()), (16, 16));
    assert!(!img.color().has_alpha());
    let px = img.to_rgb8().get_pixel(8, 8).0;
    assert!(px.iter().all(|c| *c < 8), "{px:?}");
}

#[test]
fn mismatched_buffer_is_a_render_error() {
    let mut bad = canvas(4, 4, [0, 0, 0, 255]);
    bad.rgba8_premul.truncate(10);
    assert!(matches!(export_png(&bad), Err(MemeError::Render(_))));
}

#[test]
fn flatten_keeps_opaque_and_fills_transparent() {
    let src = [1u8, 2, 3, 255, 0, 0, 0, 0];
    assert_eq!(flatten_premul_to_rgb8(&src, [10, 20, 30]), vec![1, 2, 3, 10, 20, 30]);
}

#[test]
fn format_follows_extension() {
    assert_eq!(ExportFormat::from_path(Path::new("a.PNG")).unwrap(), ExportFormat::Png);
    assert_eq!(ExportFormat::from_path(Path::new("a.jpeg")).unwrap(), ExportFormat::Jpeg);
    assert_eq!(ExportFormat::from_path(Path::new("meme")).unwrap(), ExportFormat::Png);
    assert!(ExportFormat::from_path(Path::new("a.gif")).is_err());
    assert_eq!(ExportFormat::Jpeg.mime(), "image/jpeg");
}

#[test]
fn download_name_is_stable() {
    assert_eq!(DOWNLOAD_FILE_NAME, "meme-gen-ai.png");
}

#[test]
fn save_writes_file_in_detected_format() {
    let dir = std::env::temp_dir().join(format!("memegen-save-{}", std::process::id()));
    let path = dir.join("nested").join("out.jpg");
    let format = save(&canvas(8, 8, [255, 255, 255, 255]), &path).unwrap();
    assert_eq!(format, ExportFormat::Jpeg);
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    let _ = std::fs::remove_dir_all(&dir);
}
