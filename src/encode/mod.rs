//! Encoding composed memes into downloadable image files.

/// PNG and JPEG export.
pub mod png;
