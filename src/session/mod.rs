//! Session-oriented editing API.

/// Config snapshot, source image and stale-response handling.
pub mod meme_session;
