use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::ai::backend::GenerativeBackend;
use crate::assets::decode::SourceImage;
use crate::assets::loader::ImageLoader;
use crate::assets::source::ImageReference;
use crate::captions::suggest::{
    CaptionRequest, CaptionSuggestion, apply_first_suggestion, select_request,
};
use crate::foundation::error::{MemeError, MemeResult};
use crate::render::cpu::CpuCompositor;
use crate::render::surface::RenderedCanvas;
use crate::scene::config::MemeConfig;

/// Kind of asynchronous request a session tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// Loading or generating the source image.
    Image,
    /// Caption suggestions.
    Captions,
}

/// Identifies one in-flight request. Only the latest token of each kind may apply its result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RequestToken {
    kind: RequestKind,
    seq: u64,
}

impl RequestToken {
    /// Request kind.
    pub fn kind(self) -> RequestKind {
        self.kind
    }
}

/// What happened to a finished request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The result replaced session state.
    Applied,
    /// A newer request of the same kind was issued, or the user edited the captions; the
    /// result was dropped.
    Stale,
    /// The request produced nothing to apply.
    NoChange,
}

/// Current source image and where it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedImage {
    /// Reference the pixels were loaded from.
    pub reference: ImageReference,
    /// Decoded pixels.
    pub pixels: SourceImage,
}

#[derive(Debug, Default)]
struct SessionState {
    config: MemeConfig,
    image: Option<LoadedImage>,
    image_seq: u64,
    caption_seq: u64,
}

impl SessionState {
    fn seq_mut(&mut self, kind: RequestKind) -> &mut u64 {
        match kind {
            RequestKind::Image => &mut self.image_seq,
            RequestKind::Captions => &mut self.caption_seq,
        }
    }

    fn is_latest(&self, token: RequestToken) -> bool {
        let latest = match token.kind {
            RequestKind::Image => self.image_seq,
            RequestKind::Captions => self.caption_seq,
        };
        token.seq == latest
    }
}

/// Editing state of one meme: config snapshot, source image and request bookkeeping.
///
/// Methods take `&self`; the internal lock is never held across an await, so several requests
/// may be in flight on one session. Their results apply in issue order: a response that arrives
/// after a newer request of the same kind was issued is discarded.
#[derive(Debug, Default)]
pub struct MemeSession {
    state: Mutex<SessionState>,
}

impl MemeSession {
    /// Empty session with the default config and no image.
    pub fn new() -> Self {
        Self::default()
    }

    /// Session starting from `config`.
    pub fn with_config(config: MemeConfig) -> MemeResult<Self> {
        config.validate()?;
        Ok(Self {
            state: Mutex::new(SessionState {
                config,
                ..SessionState::default()
            }),
        })
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current config snapshot.
    pub fn config(&self) -> MemeConfig {
        self.lock().config.clone()
    }

    /// Replace the config snapshot.
    ///
    /// Changing either caption supersedes any caption request in flight.
    pub fn set_config(&self, config: MemeConfig) -> MemeResult<()> {
        config.validate()?;
        let mut state = self.lock();
        if state.config.top_text != config.top_text || state.config.bottom_text != config.bottom_text
        {
            state.caption_seq += 1;
        }
        state.config = config;
        Ok(())
    }

    /// Current source image, if any.
    pub fn image(&self) -> Option<LoadedImage> {
        self.lock().image.clone()
    }

    /// Reference of the current source image, if any.
    pub fn image_reference(&self) -> Option<ImageReference> {
        self.lock().image.as_ref().map(|i| i.reference.clone())
    }

    /// Issue a new token of `kind`, superseding every earlier one.
    pub fn begin(&self, kind: RequestKind) -> RequestToken {
        let mut state = self.lock();
        let seq = state.seq_mut(kind);
        *seq += 1;
        RequestToken { kind, seq: *seq }
    }

    /// `true` while no newer request of the same kind has been issued.
    pub fn is_latest(&self, token: RequestToken) -> bool {
        self.lock().is_latest(token)
    }

    /// Apply an image result.
    ///
    /// Stale results are dropped whether they succeeded or failed. A fresh failure leaves the
    /// current image untouched and is returned.
    pub fn finish_image(
        &self,
        token: RequestToken,
        result: MemeResult<LoadedImage>,
    ) -> MemeResult<Outcome> {
        let mut state = self.lock();
        if token.kind != RequestKind::Image || !state.is_latest(token) {
            tracing::debug!(?token, "dropping stale image result");
            return Ok(Outcome::Stale);
        }
        let image = result?;
        tracing::debug!(
            reference = %image.reference,
            width = image.pixels.width,
            height = image.pixels.height,
            "source image replaced"
        );
        state.image = Some(image);
        Ok(Outcome::Applied)
    }

    /// Apply caption suggestions: the first pair replaces both captions.
    pub fn finish_captions(&self, token: RequestToken, suggestions: &[CaptionSuggestion]) -> Outcome {
        let mut state = self.lock();
        if token.kind != RequestKind::Captions || !state.is_latest(token) {
            tracing::debug!(?token, "dropping stale caption result");
            return Outcome::Stale;
        }
        match apply_first_suggestion(&state.config, suggestions) {
            Some(config) => {
                state.config = config;
                Outcome::Applied
            }
            None => Outcome::NoChange,
        }
    }

    /// Load `reference` and make it the source image.
    pub async fn load_image(
        &self,
        loader: &ImageLoader,
        reference: ImageReference,
    ) -> MemeResult<Outcome> {
        let token = self.begin(RequestKind::Image);
        let loaded = loader.load(&reference).await;
        self.finish_image(token, loaded.map(|pixels| LoadedImage { reference, pixels }))
    }

    /// Generate an image from `prompt` and make it the source image.
    pub async fn generate_image<B: GenerativeBackend>(
        &self,
        backend: &B,
        loader: &ImageLoader,
        prompt: &str,
    ) -> MemeResult<Outcome> {
        let token = self.begin(RequestKind::Image);
        let result = async {
            let embedded = backend.generate_image(prompt).await?;
            let reference = ImageReference::Embedded(embedded);
            let pixels = loader.load(&reference).await?;
            Ok::<_, MemeError>(LoadedImage { reference, pixels })
        }
        .await;
        self.finish_image(token, result)
    }

    /// Ask `backend` for captions and apply the first one.
    ///
    /// A non-blank `topic` drives the request, otherwise the current image does. Without
    /// either nothing is requested.
    pub async fn suggest_captions<B: GenerativeBackend>(
        &self,
        backend: &B,
        loader: &ImageLoader,
        topic: &str,
    ) -> Outcome {
        let current = self.image_reference();
        let Some(request) = select_request(topic, current.as_ref()) else {
            return Outcome::NoChange;
        };
        let token = self.begin(RequestKind::Captions);
        let suggestions = request_suggestions(backend, loader, request).await;
        self.finish_captions(token, &suggestions)
    }

    /// Compose the current snapshot, or `None` before any image is loaded.
    pub fn render(&self, compositor: &mut CpuCompositor) -> MemeResult<Option<RenderedCanvas>> {
        let (image, config) = {
            let state = self.lock();
            let Some(image) = state.image.as_ref() else {
                return Ok(None);
            };
            (image.pixels.clone(), state.config.clone())
        };
        compositor.compose(&image, &config).map(Some)
    }
}

/// Run `request` against `backend`, resolving image references to bytes first.
pub async fn request_suggestions<B: GenerativeBackend>(
    backend: &B,
    loader: &ImageLoader,
    request: CaptionRequest<'_>,
) -> Vec<CaptionSuggestion> {
    let count = request.count();
    match request {
        CaptionRequest::Topic(topic) => backend.suggest_for_topic(topic, count).await,
        CaptionRequest::Image(reference) => match loader.fetch(reference).await {
            Ok(embedded) => backend.suggest_for_image(&embedded, count).await,
            Err(e) => {
                tracing::warn!(error = %e, "could not read image for caption request");
                Vec::new()
            }
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/meme_session.rs"]
mod tests;
