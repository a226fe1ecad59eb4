use serde_json::{Value, json};

use crate::ai::backend::GenerativeBackend;
use crate::assets::source::{DEFAULT_IMAGE_MIME, EmbeddedImage};
use crate::captions::suggest::CaptionSuggestion;
use crate::foundation::error::{MemeError, MemeResult};

/// Public Gemini REST endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used for image generation.
pub const IMAGE_MODEL: &str = "gemini-2.5-flash-image";

/// Model used for caption suggestions.
pub const TEXT_MODEL: &str = "gemini-2.5-flash";

/// Primary credential variable.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Fallback credential variable.
pub const API_KEY_FALLBACK_ENV: &str = "API_KEY";

/// Endpoint override variable.
pub const ENDPOINT_ENV: &str = "MEMEGEN_GEMINI_ENDPOINT";

/// Connection settings for [`GeminiClient`].
#[derive(Clone, PartialEq, Eq)]
pub struct GeminiOpts {
    /// API key sent with every request.
    pub api_key: String,
    /// Base URL, without a trailing slash.
    pub endpoint: String,
    /// Image generation model.
    pub image_model: String,
    /// Caption model.
    pub text_model: String,
}

impl std::fmt::Debug for GeminiOpts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiOpts")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("image_model", &self.image_model)
            .field("text_model", &self.text_model)
            .finish()
    }
}

impl GeminiOpts {
    /// Default models and endpoint with the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            image_model: IMAGE_MODEL.to_owned(),
            text_model: TEXT_MODEL.to_owned(),
        }
    }

    /// Read settings from the process environment.
    pub fn from_env() -> MemeResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through `lookup`; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> MemeResult<Self> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let api_key = get(API_KEY_ENV)
            .or_else(|| get(API_KEY_FALLBACK_ENV))
            .ok_or_else(|| {
                MemeError::validation(format!(
                    "missing Gemini credential: set {API_KEY_ENV} (or {API_KEY_FALLBACK_ENV})"
                ))
            })?;
        let mut opts = Self::new(api_key);
        if let Some(endpoint) = get(ENDPOINT_ENV) {
            opts.endpoint = endpoint.trim_end_matches('/').to_owned();
        }
        Ok(opts)
    }

    fn url_for(&self, model: &str) -> String {
        format!("{}/models/{model}:generateContent", self.endpoint)
    }
}

/// [`GenerativeBackend`] talking to the Gemini `generateContent` REST API.
#[derive(Clone, Debug)]
pub struct GeminiClient {
    opts: GeminiOpts,
    http: reqwest::Client,
}

impl GeminiClient {
    /// Client with a fresh HTTP connection pool.
    pub fn new(opts: GeminiOpts) -> Self {
        Self::with_client(opts, reqwest::Client::new())
    }

    /// Client sharing `http`.
    pub fn with_client(opts: GeminiOpts, http: reqwest::Client) -> Self {
        Self { opts, http }
    }

    /// Settings in use.
    pub fn opts(&self) -> &GeminiOpts {
        &self.opts
    }

    async fn generate_content(&self, model: &str, body: &Value) -> MemeResult<GenerateContentResponse> {
        let url = self.opts.url_for(model);
        let resp = self
            .http
            .post(&url)
            .query(&[("key", self.opts.api_key.as_str())])
            .json(body)
            .send()
            .await
            .map_err(|e| MemeError::generation(format!("{model}: request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(MemeError::generation(format!(
                "{model}: http {status}: {}",
                detail.chars().take(300).collect::<String>()
            )));
        }

        resp.json::<GenerateContentResponse>()
            .await
            .map_err(|e| MemeError::generation(format!("{model}: malformed response: {e}")))
    }

    async fn suggest(&self, body: Value, what: &str) -> Vec<CaptionSuggestion> {
        let result = match self.generate_content(&self.opts.text_model, &body).await {
            Ok(resp) => parse_suggestions(&resp),
            Err(e) => Err(e),
        };
        match result {
            Ok(suggestions) => {
                tracing::debug!(count = suggestions.len(), what, "caption suggestions");
                suggestions
            }
            Err(e) => {
                tracing::warn!(error = %e, what, "caption suggestion failed");
                Vec::new()
            }
        }
    }
}

impl GenerativeBackend for GeminiClient {
    #[tracing::instrument(skip(self))]
    async fn generate_image(&self, prompt: &str) -> MemeResult<EmbeddedImage> {
        let resp = self
            .generate_content(&self.opts.image_model, &image_request_body(prompt))
            .await?;
        let image = first_inline_image(&resp)?;
        tracing::debug!(mime = %image.mime, chars = image.data_base64.len(), "generated image");
        Ok(image)
    }

    async fn suggest_for_topic(&self, topic: &str, count: usize) -> Vec<CaptionSuggestion> {
        self.suggest(topic_request_body(topic, count), "topic").await
    }

    async fn suggest_for_image(&self, image: &EmbeddedImage, count: usize) -> Vec<CaptionSuggestion> {
        self.suggest(image_caption_request_body(image, count), "image")
            .await
    }
}

fn suggestion_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "top": { "type": "STRING" },
                "bottom": { "type": "STRING" }
            },
            "required": ["top", "bottom"]
        }
    })
}

fn json_generation_config() -> Value {
    json!({
        "responseMimeType": "application/json",
        "responseSchema": suggestion_schema()
    })
}

pub(crate) fn image_request_body(prompt: &str) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }]
    })
}

pub(crate) fn topic_request_body(topic: &str, count: usize) -> Value {
    let prompt = format!(
        "Generate {count} funny meme caption pairs (top text and bottom text) about this topic: \
         \"{topic}\". Make them witty, internet-culture friendly, and short."
    );
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": json_generation_config()
    })
}

pub(crate) fn image_caption_request_body(image: &EmbeddedImage, count: usize) -> Value {
    let instruction = format!(
        "Look at this image and generate {count} hilarious meme caption pairs \
         (top text and bottom text) that fit the context perfectly."
    );
    json!({
        "contents": [{
            "parts": [
                { "inlineData": { "mimeType": image.mime, "data": image.data_base64 } },
                { "text": instruction }
            ]
        }],
        "generationConfig": json_generation_config()
    })
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default)]
    mime_type: Option<String>,
    #[serde(default)]
    data: Option<String>,
}

impl GenerateContentResponse {
    fn first_parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or_default()
    }

    /// Concatenated text parts of the first candidate.
    fn text(&self) -> Option<String> {
        let text: String = self
            .first_parts()
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.is_empty()).then_some(text)
    }
}

pub(crate) fn first_inline_image(resp: &GenerateContentResponse) -> MemeResult<EmbeddedImage> {
    resp.first_parts()
        .iter()
        .filter_map(|p| p.inline_data.as_ref())
        .find_map(|d| {
            let data = d.data.as_deref().filter(|s| !s.is_empty())?;
            let mime = d
                .mime_type
                .as_deref()
                .filter(|m| !m.is_empty())
                .unwrap_or(DEFAULT_IMAGE_MIME);
            Some(EmbeddedImage {
                mime: mime.to_owned(),
                data_base64: data.to_owned(),
            })
        })
        .ok_or_else(|| MemeError::generation("no image data found in response"))
}

pub(crate) fn parse_suggestions(resp: &GenerateContentResponse) -> MemeResult<Vec<CaptionSuggestion>> {
    let Some(text) = resp.text() else {
        return Ok(Vec::new());
    };
    serde_json::from_str(&text)
        .map_err(|e| MemeError::serde(format!("caption suggestions are not a JSON pair list: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/ai/gemini.rs"]
mod tests;
