use crate::assets::source::ImageReference;
use crate::scene::config::MemeConfig;

/// Suggestions requested for a topic.
pub const TOPIC_SUGGESTION_COUNT: usize = 5;

/// Suggestions requested for an image.
pub const IMAGE_SUGGESTION_COUNT: usize = 4;

/// One top/bottom caption pair proposed by a backend.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CaptionSuggestion {
    /// Top caption.
    pub top: String,
    /// Bottom caption.
    pub bottom: String,
}

impl CaptionSuggestion {
    /// Build a pair.
    pub fn new(top: impl Into<String>, bottom: impl Into<String>) -> Self {
        Self {
            top: top.into(),
            bottom: bottom.into(),
        }
    }
}

/// What a caption request is driven by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptionRequest<'a> {
    /// Captions about a free-text topic.
    Topic(&'a str),
    /// Captions describing the current image.
    Image(&'a ImageReference),
}

impl CaptionRequest<'_> {
    /// Number of suggestions to ask for.
    pub fn count(&self) -> usize {
        match self {
            Self::Topic(_) => TOPIC_SUGGESTION_COUNT,
            Self::Image(_) => IMAGE_SUGGESTION_COUNT,
        }
    }
}

/// Pick the request source.
///
/// A non-blank topic wins; otherwise the current image is described. With neither there is
/// nothing to ask and `None` is returned.
pub fn select_request<'a>(
    topic: &'a str,
    image: Option<&'a ImageReference>,
) -> Option<CaptionRequest<'a>> {
    let topic = topic.trim();
    if !topic.is_empty() {
        return Some(CaptionRequest::Topic(topic));
    }
    image.map(CaptionRequest::Image)
}

/// Apply the first suggestion to `config`.
///
/// Returns the new snapshot, or `None` when there is nothing to apply.
pub fn apply_first_suggestion(
    config: &MemeConfig,
    suggestions: &[CaptionSuggestion],
) -> Option<MemeConfig> {
    let first = suggestions.first()?;
    Some(
        config
            .clone()
            .with_captions(first.top.clone(), first.bottom.clone()),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/captions/suggest.rs"]
mod tests;
