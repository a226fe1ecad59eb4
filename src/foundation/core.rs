use crate::foundation::error::{MemeError, MemeResult};

/// Widest canvas produced by the compositor; wider sources are downscaled.
pub const MAX_CANVAS_WIDTH: u32 = 800;

/// Distance in pixels between a caption anchor and the canvas edge.
pub const CAPTION_PADDING_PX: f32 = 20.0;

/// Line advance as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Stroke width is `font_size / STROKE_WIDTH_DIVISOR`.
pub const STROKE_WIDTH_DIVISOR: f32 = 8.0;

/// Smallest accepted caption font size.
pub const MIN_FONT_SIZE: f32 = 20.0;

/// Largest accepted caption font size.
pub const MAX_FONT_SIZE: f32 = 100.0;

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Fit a `src_width x src_height` source into a canvas at most `max_width` wide.
    ///
    /// Only ever downscales: sources narrower than `max_width` keep their size. The height
    /// follows the same scale factor, rounded to the nearest pixel and never below 1.
    pub fn fit(src_width: u32, src_height: u32, max_width: u32) -> MemeResult<Self> {
        if src_width == 0 || src_height == 0 {
            return Err(MemeError::validation("source dimensions must be > 0"));
        }
        if max_width == 0 {
            return Err(MemeError::validation("max canvas width must be > 0"));
        }

        let width = src_width.min(max_width);
        let scale = f64::from(width) / f64::from(src_width);
        let height = (f64::from(src_height) * scale).round().max(1.0) as u32;
        Ok(Self { width, height })
    }

    /// Scale factor from source pixels to canvas pixels (always `<= 1`).
    pub fn scale_from(self, src_width: u32) -> f64 {
        if src_width == 0 {
            return 1.0;
        }
        f64::from(self.width) / f64::from(src_width)
    }

    /// Horizontal center line, where captions are aligned.
    pub fn center_x(self) -> f32 {
        self.width as f32 / 2.0
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Self = Self::opaque(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::opaque(0, 0, 0);

    /// Opaque color from RGB channels.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Format as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!(
                "#{:02X}{:02X}{:02X}{:02X}",
                self.r, self.g, self.b, self.a
            )
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
