use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use base64::Engine as _;

use crate::foundation::error::{MemeError, MemeResult};

/// Mime type assumed when an embedded payload or backend response omits one.
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Base64-encoded image bytes plus their mime type (a `data:` URL without the header).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmbeddedImage {
    /// Mime type, e.g. `image/png`.
    pub mime: String,
    /// Standard base64 payload, no `data:` header.
    pub data_base64: String,
}

impl EmbeddedImage {
    /// Encode raw image bytes.
    pub fn from_bytes(mime: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime: mime.into(),
            data_base64: base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }

    /// Decode the base64 payload.
    pub fn decode_bytes(&self) -> MemeResult<Vec<u8>> {
        base64::engine::general_purpose::STANDARD
            .decode(self.data_base64.trim())
            .map_err(|e| MemeError::decode(format!("invalid base64 image payload: {e}")))
    }

    /// Render as `data:<mime>;base64,<data>`.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.data_base64)
    }

    /// Parse a `data:<mime>;base64,<data>` URL.
    pub fn parse_data_url(s: &str) -> MemeResult<Self> {
        let rest = s
            .strip_prefix("data:")
            .ok_or_else(|| MemeError::decode("embedded image must start with \"data:\""))?;
        let (header, data) = rest
            .split_once(',')
            .ok_or_else(|| MemeError::decode("embedded image is missing the ',' separator"))?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or_else(|| MemeError::decode("embedded image must be base64 encoded"))?;
        let mime = if mime.is_empty() {
            DEFAULT_IMAGE_MIME
        } else {
            mime
        };
        Ok(Self {
            mime: mime.to_owned(),
            data_base64: data.to_owned(),
        })
    }
}

/// Where a source image comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageReference {
    /// Remote `http(s)` URL.
    Url(String),
    /// Inline base64 payload (uploads and generated images).
    Embedded(EmbeddedImage),
    /// Local file.
    File(PathBuf),
}

impl ImageReference {
    /// Mime type of an embedded payload, if known without fetching.
    pub fn mime(&self) -> Option<&str> {
        match self {
            Self::Embedded(e) => Some(e.mime.as_str()),
            Self::Url(_) | Self::File(_) => None,
        }
    }
}

impl FromStr for ImageReference {
    type Err = MemeError;

    /// `data:` → embedded, `http://`/`https://` → URL, anything else is a file path.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(MemeError::validation("image reference must be non-empty"));
        }
        if s.starts_with("data:") {
            return EmbeddedImage::parse_data_url(s).map(Self::Embedded);
        }
        let lower = s.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return Ok(Self::Url(s.to_owned()));
        }
        Ok(Self::File(PathBuf::from(s)))
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(u) => f.write_str(u),
            Self::Embedded(e) => write!(f, "data:{};base64,<{} chars>", e.mime, e.data_base64.len()),
            Self::File(p) => write!(f, "{}", p.display()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
