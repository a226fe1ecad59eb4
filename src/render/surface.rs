use std::sync::Arc;

use crate::assets::decode::{SourceImage, unpremultiply_rgba8_in_place};
use crate::foundation::core::Canvas;
use crate::foundation::error::{MemeError, MemeResult};

/// A composed meme as RGBA8 pixels.
///
/// Pixels are **premultiplied alpha**, tightly packed and row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedCanvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8 bytes.
    pub rgba8_premul: Vec<u8>,
}

impl RenderedCanvas {
    /// Canvas dimensions.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Copy of the pixels with alpha un-premultiplied.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut straight = self.rgba8_premul.clone();
        unpremultiply_rgba8_in_place(&mut straight);
        straight
    }

    /// Premultiplied pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.rgba8_premul.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    pub(crate) fn from_pixmap(pixmap: &vello_cpu::Pixmap) -> Self {
        Self {
            width: u32::from(pixmap.width()),
            height: u32::from(pixmap.height()),
            rgba8_premul: pixmap.data_as_u8_slice().to_vec(),
        }
    }
}

pub(crate) fn canvas_size_u16(canvas: Canvas) -> MemeResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| MemeError::render("canvas width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| MemeError::render("canvas height exceeds u16"))?;
    Ok((w, h))
}

/// A source wrapped as a `vello_cpu` image paint, with the pixel size of the paint.
pub(crate) struct SourcePaint {
    pub(crate) image: vello_cpu::Image,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

/// Wrap a decoded source as a `vello_cpu` image paint.
///
/// Sources too large for a pixmap are first resampled to `canvas`.
pub(crate) fn source_image_paint(source: &SourceImage, canvas: Canvas) -> MemeResult<SourcePaint> {
    let max = u32::from(u16::MAX);
    let resampled;
    let (bytes, width, height): (&[u8], u32, u32) = if source.width > max || source.height > max {
        let full = image::RgbaImage::from_raw(
            source.width,
            source.height,
            source.rgba8_premul.as_ref().clone(),
        )
        .ok_or_else(|| MemeError::render("source image byte length mismatch"))?;
        let small = image::imageops::resize(
            &full,
            canvas.width,
            canvas.height,
            image::imageops::FilterType::Triangle,
        );
        tracing::debug!(
            src_w = source.width,
            src_h = source.height,
            "resampled oversized source before painting"
        );
        resampled = small.into_raw();
        (resampled.as_slice(), canvas.width, canvas.height)
    } else {
        (source.rgba8_premul.as_slice(), source.width, source.height)
    };

    let pixmap = pixmap_from_premul_bytes(bytes, width, height)?;
    Ok(SourcePaint {
        image: vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        },
        width,
        height,
    })
}

fn pixmap_from_premul_bytes(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> MemeResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| MemeError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| MemeError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(MemeError::render("source image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}
