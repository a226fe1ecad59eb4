use crate::assets::decode::SourceImage;
use crate::assets::font::{DisplayFace, TextShaper};
use crate::foundation::core::Rgba8;
use crate::foundation::error::{MemeError, MemeResult};
use crate::render::plan::{CaptionStyle, CompositionPlan, CompositorOpts, plan_composition};
use crate::render::surface::{RenderedCanvas, canvas_size_u16, source_image_paint};
use crate::scene::config::MemeConfig;
use crate::text::block::{Anchor, LineBlock};
use crate::text::measure::FaceMeasurer;

/// CPU meme compositor powered by `vello_cpu`.
///
/// `compose` takes `&mut self`, so one compositor never runs two passes at once. The only state
/// kept between calls is the Parley shaping context, which does not affect output pixels.
pub struct CpuCompositor {
    opts: CompositorOpts,
    face: Option<DisplayFace>,
    shaper: Option<TextShaper>,
}

impl CpuCompositor {
    /// Compositor without a display face; it can only compose configs with empty captions.
    pub fn new(opts: CompositorOpts) -> Self {
        Self {
            opts,
            face: None,
            shaper: None,
        }
    }

    /// Compositor drawing captions with `face`.
    pub fn with_face(face: DisplayFace, opts: CompositorOpts) -> MemeResult<Self> {
        let shaper = TextShaper::new(&face)?;
        Ok(Self {
            opts,
            face: Some(face),
            shaper: Some(shaper),
        })
    }

    /// Geometry options in use.
    pub fn opts(&self) -> &CompositorOpts {
        &self.opts
    }

    /// Lay out `config` over `image` without painting.
    pub fn plan(&mut self, image: &SourceImage, config: &MemeConfig) -> MemeResult<CompositionPlan> {
        match self.shaper.as_mut() {
            Some(shaper) => {
                let mut measure = FaceMeasurer::new(shaper, config.font_size);
                plan_composition(image.width, image.height, config, &mut measure, &self.opts)
            }
            None if config.has_no_captions() => {
                let mut unused = |_: &str| 0.0f32;
                plan_composition(image.width, image.height, config, &mut unused, &self.opts)
            }
            None => Err(MemeError::validation(
                "captions need a display face; construct the compositor with one",
            )),
        }
    }

    /// Render `config` over `image`.
    ///
    /// Identical inputs always produce identical bytes.
    #[tracing::instrument(skip(self, image, config), fields(src_w = image.width, src_h = image.height))]
    pub fn compose(&mut self, image: &SourceImage, config: &MemeConfig) -> MemeResult<RenderedCanvas> {
        let plan = self.plan(image, config)?;
        let (w, h) = canvas_size_u16(plan.canvas)?;

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        paint_source(&mut ctx, image, &plan)?;

        for block in plan.blocks() {
            self.paint_block(&mut ctx, block, &plan)?;
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);

        tracing::debug!(
            width = plan.canvas.width,
            height = plan.canvas.height,
            blocks = plan.blocks().count(),
            "composed meme"
        );
        Ok(RenderedCanvas::from_pixmap(&pixmap))
    }

    fn paint_block(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        block: &LineBlock,
        plan: &CompositionPlan,
    ) -> MemeResult<()> {
        let (Some(face), Some(shaper)) = (self.face.as_ref(), self.shaper.as_mut()) else {
            return Err(MemeError::validation("captions need a display face"));
        };

        for (text, line_y) in block.positioned() {
            let layout = shaper.layout_line(text, plan.style.font_size);
            let Some(line) = layout.lines().next() else {
                continue;
            };
            let metrics = line.metrics();

            // Top blocks hang from the top of the line box, bottom blocks sit on its bottom.
            let baseline_y = match block.anchor {
                Anchor::Top => line_y + metrics.ascent,
                Anchor::Bottom => line_y - metrics.descent,
            };
            let origin_x = plan.center_x - layout.full_width() / 2.0;
            let origin_y = baseline_y - metrics.baseline;

            let mut glyphs = Vec::new();
            let mut run_size = plan.style.font_size;
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                run_size = run.run().font_size();
                glyphs.extend(run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                }));
            }
            if glyphs.is_empty() {
                continue;
            }

            ctx.set_transform(vello_cpu::kurbo::Affine::translate((
                f64::from(origin_x),
                f64::from(origin_y),
            )));
            paint_glyphs(ctx, face, &glyphs, run_size, &plan.style);
        }
        Ok(())
    }
}

fn paint_source(
    ctx: &mut vello_cpu::RenderContext,
    image: &SourceImage,
    plan: &CompositionPlan,
) -> MemeResult<()> {
    let paint = source_image_paint(image, plan.canvas)?;
    let sx = f64::from(plan.canvas.width) / f64::from(paint.width);
    let sy = f64::from(plan.canvas.height) / f64::from(paint.height);

    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_transform(vello_cpu::kurbo::Affine::scale_non_uniform(sx, sy));
    ctx.set_paint(paint.image);
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(paint.width),
        f64::from(paint.height),
    ));
    Ok(())
}

/// Outline first, then fill on top.
fn paint_glyphs(
    ctx: &mut vello_cpu::RenderContext,
    face: &DisplayFace,
    glyphs: &[vello_cpu::Glyph],
    font_size: f32,
    style: &CaptionStyle,
) {
    ctx.set_stroke(
        vello_cpu::kurbo::Stroke::new(f64::from(style.stroke_width))
            .with_join(vello_cpu::kurbo::Join::Round),
    );
    ctx.set_paint(to_cpu_color(style.stroke));
    ctx.glyph_run(face.font_data())
        .font_size(font_size)
        .stroke_glyphs(glyphs.iter().cloned());

    ctx.set_paint(to_cpu_color(style.fill));
    ctx.glyph_run(face.font_data())
        .font_size(font_size)
        .fill_glyphs(glyphs.iter().cloned());
}

fn to_cpu_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
