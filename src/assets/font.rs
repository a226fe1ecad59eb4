use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::error::{MemeError, MemeResult};

/// Lightest weight accepted for the display face (CSS `bold`).
pub const MIN_DISPLAY_WEIGHT: f32 = 700.0;

/// The single bold display face used for every caption.
///
/// Cloning is cheap: font bytes are shared.
#[derive(Clone)]
pub struct DisplayFace {
    bytes: Arc<Vec<u8>>,
    font: vello_cpu::peniko::FontData,
    weight: f32,
}

impl std::fmt::Debug for DisplayFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisplayFace")
            .field("font_bytes_len", &self.bytes.len())
            .field("weight", &self.weight)
            .finish()
    }
}

impl DisplayFace {
    /// Wrap raw TTF/OTF bytes.
    ///
    /// Rejected when no font family can be read from them, or when the first face is lighter
    /// than [`MIN_DISPLAY_WEIGHT`].
    pub fn from_bytes(bytes: Vec<u8>) -> MemeResult<Self> {
        let mut fcx = parley::FontContext::default();
        let families = fcx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        let weight = families
            .iter()
            .flat_map(|(_, fonts)| fonts.iter())
            .find(|info| info.index() == 0)
            .map(|info| info.weight().value())
            .ok_or_else(|| MemeError::validation("no font families registered from font bytes"))?;
        if weight < MIN_DISPLAY_WEIGHT {
            return Err(MemeError::validation(format!(
                "caption face must be bold (weight >= {MIN_DISPLAY_WEIGHT}), got weight {weight}"
            )));
        }

        let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes.clone()), 0);
        Ok(Self {
            bytes: Arc::new(bytes),
            font,
            weight,
        })
    }

    /// Weight class of the face, `>= 700`.
    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// Read a font file from disk.
    pub fn from_path(path: impl AsRef<Path>) -> MemeResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font file '{}'", path.display()))?;
        Self::from_bytes(bytes)
    }

    /// Raw font bytes.
    pub fn bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    pub(crate) fn font_data(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }
}

/// Stateful helper shaping single caption lines with the display face.
///
/// Owns the Parley contexts so repeated measurements reuse their scratch buffers.
pub(crate) struct TextShaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    family_name: String,
    weight: f32,
}

impl TextShaper {
    /// Register `face` into fresh Parley contexts.
    pub(crate) fn new(face: &DisplayFace) -> MemeResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(face.bytes().to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            MemeError::validation("no font families registered from font bytes")
        })?;

        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| MemeError::validation("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            weight: face.weight(),
        })
    }

    /// Shape `text` as one unbroken line at `size_px`.
    pub(crate) fn layout_line(&mut self, text: &str, size_px: f32) -> parley::Layout<()> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(
                self.family_name.clone(),
            )),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(self.weight),
        ));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        layout.align(
            None,
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );
        layout
    }

    /// Advance width of `text` at `size_px`, trailing whitespace included.
    pub(crate) fn advance(&mut self, text: &str, size_px: f32) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        self.layout_line(text, size_px).full_width()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
