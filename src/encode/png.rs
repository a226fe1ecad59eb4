use std::io::Cursor;
use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{MemeError, MemeResult};
use crate::render::surface::RenderedCanvas;

/// File name offered when a meme is downloaded.
pub const DOWNLOAD_FILE_NAME: &str = "meme-gen-ai.png";

/// Background JPEG export flattens translucent pixels onto.
pub const JPEG_BACKGROUND: [u8; 3] = [0, 0, 0];

const JPEG_QUALITY: u8 = 92;

/// Encoded output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// Lossless RGBA PNG.
    #[default]
    Png,
    /// Opaque RGB JPEG.
    Jpeg,
}

impl ExportFormat {
    /// Pick a format from a file extension, case-insensitively.
    pub fn from_path(path: &Path) -> MemeResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("png") | None => Ok(Self::Png),
            Some("jpg" | "jpeg") => Ok(Self::Jpeg),
            Some(other) => Err(MemeError::validation(format!(
                "unsupported export extension '.{other}' (expected .png, .jpg or .jpeg)"
            ))),
        }
    }

    /// MIME type of encoded output.
    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }
}

/// Encode `canvas` as a PNG of exactly the canvas dimensions.
pub fn export_png(canvas: &RenderedCanvas) -> MemeResult<Vec<u8>> {
    export(canvas, ExportFormat::Png)
}

/// Encode `canvas` in `format`.
#[tracing::instrument(skip(canvas), fields(width = canvas.width, height = canvas.height))]
pub fn export(canvas: &RenderedCanvas, format: ExportFormat) -> MemeResult<Vec<u8>> {
    let expected = canvas.width as usize * canvas.height as usize * 4;
    if canvas.rgba8_premul.len() != expected {
        return Err(MemeError::render(format!(
            "canvas byte length {} does not match {}x{}",
            canvas.rgba8_premul.len(),
            canvas.width,
            canvas.height
        )));
    }

    let mut out = Vec::new();
    let result = match format {
        ExportFormat::Png => image::write_buffer_with_format(
            &mut Cursor::new(&mut out),
            &canvas.to_straight_rgba8(),
            canvas.width,
            canvas.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        ),
        ExportFormat::Jpeg => {
            let rgb = flatten_premul_to_rgb8(&canvas.rgba8_premul, JPEG_BACKGROUND);
            let encoder =
                image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
            image::ImageEncoder::write_image(
                encoder,
                &rgb,
                canvas.width,
                canvas.height,
                image::ExtendedColorType::Rgb8,
            )
        }
    };
    result.map_err(|e| MemeError::render(format!("encode {format:?}: {e}")))?;

    tracing::debug!(bytes = out.len(), ?format, "exported meme");
    Ok(out)
}

/// Encode `canvas` and write it to `path`, choosing the format from the extension.
pub fn save(canvas: &RenderedCanvas, path: &Path) -> MemeResult<ExportFormat> {
    let format = ExportFormat::from_path(path)?;
    let bytes = export(canvas, format)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))?;
    Ok(format)
}

fn flatten_premul_to_rgb8(src_premul: &[u8], bg: [u8; 3]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(src_premul.len() / 4 * 3);
    for s in src_premul.chunks_exact(4) {
        let inv = 255u16 - u16::from(s[3]);
        for c in 0..3 {
            let v = u16::from(s[c]) + mul_div255(u16::from(bg[c]), inv);
            rgb.push(v.min(255) as u8);
        }
    }
    rgb
}

fn mul_div255(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
