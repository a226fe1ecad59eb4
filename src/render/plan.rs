use crate::foundation::core::{
    CAPTION_PADDING_PX, Canvas, LINE_HEIGHT_FACTOR, MAX_CANVAS_WIDTH, Rgba8, STROKE_WIDTH_DIVISOR,
};
use crate::foundation::error::MemeResult;
use crate::scene::config::MemeConfig;
use crate::text::block::{Anchor, LineBlock};
use crate::text::measure::TextMeasure;
use crate::text::wrap::wrap_text;

/// Geometry knobs of the compositor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompositorOpts {
    /// Widest canvas produced; wider sources are downscaled.
    pub max_width: u32,
    /// Distance from a caption anchor to the canvas edge, also the side margin.
    pub padding: f32,
    /// Line advance as a multiple of the font size.
    pub line_height_factor: f32,
}

impl Default for CompositorOpts {
    fn default() -> Self {
        Self {
            max_width: MAX_CANVAS_WIDTH,
            padding: CAPTION_PADDING_PX,
            line_height_factor: LINE_HEIGHT_FACTOR,
        }
    }
}

/// Paint state shared by both captions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptionStyle {
    /// Font size in canvas pixels.
    pub font_size: f32,
    /// Glyph fill.
    pub fill: Rgba8,
    /// Glyph outline.
    pub stroke: Rgba8,
    /// Outline width, `font_size / 8`.
    pub stroke_width: f32,
}

impl CaptionStyle {
    fn from_config(config: &MemeConfig) -> Self {
        Self {
            font_size: config.font_size,
            fill: config.text_color,
            stroke: config.stroke_color,
            stroke_width: config.font_size / STROKE_WIDTH_DIVISOR,
        }
    }
}

/// Everything needed to paint one meme, before any pixel is touched.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositionPlan {
    /// Output size.
    pub canvas: Canvas,
    /// Source to canvas scale factor, `<= 1`.
    pub scale: f64,
    /// X every caption line is centered on.
    pub center_x: f32,
    /// Caption paint state.
    pub style: CaptionStyle,
    /// Top caption, absent when the text is empty.
    pub top: Option<LineBlock>,
    /// Bottom caption, absent when the text is empty.
    pub bottom: Option<LineBlock>,
}

impl CompositionPlan {
    /// Caption blocks present in this plan, top first.
    pub fn blocks(&self) -> impl Iterator<Item = &LineBlock> {
        self.top.iter().chain(self.bottom.iter())
    }
}

/// Lay out a meme over a `src_width x src_height` source.
///
/// `measure` must already be configured for `config.font_size`; it is not called when both
/// captions are empty.
#[tracing::instrument(skip(config, measure, opts))]
pub fn plan_composition<M>(
    src_width: u32,
    src_height: u32,
    config: &MemeConfig,
    measure: &mut M,
    opts: &CompositorOpts,
) -> MemeResult<CompositionPlan>
where
    M: TextMeasure + ?Sized,
{
    config.validate()?;
    let canvas = Canvas::fit(src_width, src_height, opts.max_width)?;
    let scale = canvas.scale_from(src_width);

    let max_line_width = canvas.width as f32 - 2.0 * opts.padding;
    let line_height = config.font_size * opts.line_height_factor;

    let mut block_for = |text: &str, start_y: f32, anchor: Anchor| -> Option<LineBlock> {
        if text.is_empty() {
            return None;
        }
        let lines = wrap_text(&text.to_uppercase(), &mut *measure, max_line_width);
        Some(LineBlock::new(lines, start_y, line_height, anchor))
    };

    let top = block_for(&config.top_text, opts.padding, Anchor::Top);
    let bottom = block_for(
        &config.bottom_text,
        canvas.height as f32 - opts.padding,
        Anchor::Bottom,
    );

    Ok(CompositionPlan {
        canvas,
        scale,
        center_x: canvas.center_x(),
        style: CaptionStyle::from_config(config),
        top,
        bottom,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/plan.rs"]
mod tests;
