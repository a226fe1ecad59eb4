use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::{MAX_FONT_SIZE, MIN_FONT_SIZE, Rgba8};
use crate::foundation::error::{MemeError, MemeResult};

/// Caption configuration snapshot.
///
/// Owned by the caller and handed to the renderer by reference for each render; the renderer
/// never keeps it. Editing produces a new snapshot via the `with_*` methods.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemeConfig {
    /// Caption above the image. Empty renders nothing.
    pub top_text: String,
    /// Caption below the image. Empty renders nothing.
    pub bottom_text: String,
    /// Font size in canvas pixels, within `20..=100`.
    pub font_size: f32,
    /// Fill color of the caption glyphs.
    #[serde(serialize_with = "ser_hex")]
    pub text_color: Rgba8,
    /// Outline color of the caption glyphs.
    #[serde(serialize_with = "ser_hex")]
    pub stroke_color: Rgba8,
}

impl Default for MemeConfig {
    fn default() -> Self {
        Self {
            top_text: String::new(),
            bottom_text: String::new(),
            font_size: 40.0,
            text_color: Rgba8::WHITE,
            stroke_color: Rgba8::BLACK,
        }
    }
}

fn ser_hex<S: serde::Serializer>(c: &Rgba8, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&c.to_hex())
}

impl MemeConfig {
    /// Parse a config from a JSON reader. Missing keys take their defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> MemeResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| MemeError::serde(format!("parse meme config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> MemeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            MemeError::validation(format!("open meme config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize to pretty JSON with camelCase keys and hex colors.
    pub fn to_json(&self) -> MemeResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| MemeError::serde(e.to_string()))
    }

    /// Check the font size range.
    pub fn validate(&self) -> MemeResult<()> {
        if !self.font_size.is_finite()
            || !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&self.font_size)
        {
            return Err(MemeError::validation(format!(
                "font size must be within {MIN_FONT_SIZE}..={MAX_FONT_SIZE}, got {}",
                self.font_size
            )));
        }
        Ok(())
    }

    /// `true` when neither caption has text.
    pub fn has_no_captions(&self) -> bool {
        self.top_text.is_empty() && self.bottom_text.is_empty()
    }

    /// New snapshot with a different top caption.
    pub fn with_top_text(mut self, text: impl Into<String>) -> Self {
        self.top_text = text.into();
        self
    }

    /// New snapshot with a different bottom caption.
    pub fn with_bottom_text(mut self, text: impl Into<String>) -> Self {
        self.bottom_text = text.into();
        self
    }

    /// New snapshot with both captions replaced.
    pub fn with_captions(self, top: impl Into<String>, bottom: impl Into<String>) -> Self {
        self.with_top_text(top).with_bottom_text(bottom)
    }

    /// New snapshot with a different font size (not validated here).
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// New snapshot with a different fill color.
    pub fn with_text_color(mut self, color: Rgba8) -> Self {
        self.text_color = color;
        self
    }

    /// New snapshot with a different outline color.
    pub fn with_stroke_color(mut self, color: Rgba8) -> Self {
        self.stroke_color = color;
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
