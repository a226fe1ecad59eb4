//! memegen composes captioned images ("memes").
//!
//! A source image is scaled to fit an 800px-wide canvas, then an uppercase top and bottom caption
//! are word-wrapped, outlined and filled over it. The public API is snapshot-oriented:
//!
//! - Load a [`SourceImage`] through an [`ImageLoader`] (URL, `data:` URL or file)
//! - Describe captions with an immutable [`MemeConfig`]
//! - Render with a [`CpuCompositor`] and export with [`export_png`]
//!
//! Optional AI features (image generation, caption suggestions) sit behind the
//! [`GenerativeBackend`] trait; [`MemeSession`] sequences them and drops stale responses.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;

/// Generative AI boundary.
pub mod ai;
/// Caption suggestions.
pub mod captions;
/// Image export.
pub mod encode;
/// Compositing.
pub mod render;
pub(crate) mod scene;
/// Session-oriented editing API.
pub mod session;
pub(crate) mod text;


pub use crate::foundation::core::{
    CAPTION_PADDING_PX, Canvas, LINE_HEIGHT_FACTOR, MAX_CANVAS_WIDTH, MAX_FONT_SIZE,
    MIN_FONT_SIZE, Rgba8, STROKE_WIDTH_DIVISOR,
};
pub use crate::foundation::error::{MemeError, MemeResult};

pub use crate::ai::backend::GenerativeBackend;
pub use crate::ai::gemini::{GeminiClient, GeminiOpts};
pub use crate::assets::decode::{SourceImage, decode_image};
pub use crate::assets::font::DisplayFace;
pub use crate::assets::loader::ImageLoader;
pub use crate::assets::source::{EmbeddedImage, ImageReference};
pub use crate::captions::suggest::{CaptionRequest, CaptionSuggestion};
pub use crate::encode::png::{DOWNLOAD_FILE_NAME, ExportFormat, export, export_png};
pub use crate::render::cpu::CpuCompositor;
pub use crate::render::plan::{CompositionPlan, CompositorOpts, plan_composition};
pub use crate::render::surface::RenderedCanvas;
pub use crate::scene::config::MemeConfig;
pub use crate::session::meme_session::{MemeSession, Outcome, RequestKind, RequestToken};
pub use crate::text::block::{Anchor, LineBlock};
pub use crate::text::measure::TextMeasure;
pub use crate::text::wrap::wrap_text;
