//! Generative AI boundary: image generation and caption suggestions.

/// Backend trait.
pub mod backend;
/// Gemini REST client.
pub mod gemini;
