use crate::assets::font::TextShaper;

/// Width of a rendered string in canvas pixels.
///
/// Measurement depends on font family, weight and size, so implementors are configured
/// before being handed to [`crate::text::wrap::wrap_text`].
pub trait TextMeasure {
    /// Advance width of `text`, trailing whitespace included.
    fn measure(&mut self, text: &str) -> f32;
}

impl<F> TextMeasure for F
where
    F: FnMut(&str) -> f32,
{
    fn measure(&mut self, text: &str) -> f32 {
        self(text)
    }
}

/// Measures with the display face at a fixed font size.
pub(crate) struct FaceMeasurer<'a> {
    shaper: &'a mut TextShaper,
    size_px: f32,
}

impl<'a> FaceMeasurer<'a> {
    pub(crate) fn new(shaper: &'a mut TextShaper, size_px: f32) -> Self {
        Self { shaper, size_px }
    }
}

impl TextMeasure for FaceMeasurer<'_> {
    fn measure(&mut self, text: &str) -> f32 {
        self.shaper.advance(text, self.size_px)
    }
}
