use crate::assets::decode::{SourceImage, decode_image};
use crate::assets::source::{DEFAULT_IMAGE_MIME, EmbeddedImage, ImageReference};
use crate::foundation::error::{MemeError, MemeResult};

/// Async loader turning an [`ImageReference`] into decoded pixels.
///
/// Failures surface as [`MemeError::Decode`] and are never retried.
#[derive(Clone, Debug, Default)]
pub struct ImageLoader {
    http: reqwest::Client,
}

impl ImageLoader {
    /// Create a loader with a fresh HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader sharing an existing HTTP client.
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Fetch and decode `reference`.
    #[tracing::instrument(skip(self, reference), fields(reference = %reference))]
    pub async fn load(&self, reference: &ImageReference) -> MemeResult<SourceImage> {
        let embedded = self.fetch(reference).await?;
        let bytes = embedded.decode_bytes()?;
        let image = decode_image(&bytes)?;
        tracing::debug!(width = image.width, height = image.height, "decoded source image");
        Ok(image)
    }

    /// Fetch the raw bytes behind `reference` as an embedded payload, without decoding pixels.
    ///
    /// Image-conditioned caption requests need the encoded bytes, not the bitmap.
    pub async fn fetch(&self, reference: &ImageReference) -> MemeResult<EmbeddedImage> {
        match reference {
            ImageReference::Embedded(e) => Ok(e.clone()),
            ImageReference::File(path) => {
                let bytes = tokio::fs::read(path).await.map_err(|e| {
                    MemeError::decode(format!("read image file '{}': {e}", path.display()))
                })?;
                Ok(EmbeddedImage::from_bytes(mime_for_bytes(&bytes), &bytes))
            }
            ImageReference::Url(url) => {
                let resp = self
                    .http
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| MemeError::decode(format!("fetch '{url}': {e}")))?;
                let status = resp.status();
                if !status.is_success() {
                    return Err(MemeError::decode(format!("fetch '{url}': http {status}")));
                }
                let header_mime = resp
                    .headers()
                    .get(reqwest::header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .map(|v| v.split(';').next().unwrap_or(v).trim().to_owned())
                    .filter(|v| v.starts_with("image/"));
                let bytes = resp
                    .bytes()
                    .await
                    .map_err(|e| MemeError::decode(format!("read body of '{url}': {e}")))?;
                let mime = header_mime.unwrap_or_else(|| mime_for_bytes(&bytes).to_owned());
                Ok(EmbeddedImage::from_bytes(mime, &bytes))
            }
        }
    }
}

/// Best-effort mime sniffing from magic bytes.
pub(crate) fn mime_for_bytes(bytes: &[u8]) -> &'static str {
    image::guess_format(bytes)
        .ok()
        .map(|f| f.to_mime_type())
        .unwrap_or(DEFAULT_IMAGE_MIME)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
