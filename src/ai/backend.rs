use std::future::Future;

use crate::assets::source::EmbeddedImage;
use crate::captions::suggest::CaptionSuggestion;
use crate::foundation::error::MemeResult;

/// A service that can paint images from prompts and propose captions.
///
/// Image generation reports failures. Caption calls never fail: a backend that cannot answer
/// returns an empty list.
pub trait GenerativeBackend: Send + Sync {
    /// Generate one image for `prompt`.
    fn generate_image(&self, prompt: &str) -> impl Future<Output = MemeResult<EmbeddedImage>> + Send;

    /// Propose up to `count` caption pairs about `topic`.
    fn suggest_for_topic(
        &self,
        topic: &str,
        count: usize,
    ) -> impl Future<Output = Vec<CaptionSuggestion>> + Send;

    /// Propose up to `count` caption pairs for `image`.
    fn suggest_for_image(
        &self,
        image: &EmbeddedImage,
        count: usize,
    ) -> impl Future<Output = Vec<CaptionSuggestion>> + Send;
}
