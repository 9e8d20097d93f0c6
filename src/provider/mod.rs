pub mod gemini;

use anyhow::Result;
use async_trait::async_trait;

pub use gemini::GeminiClient;

/// Single-shot text completion.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRequest {
    pub prompt: String,
    pub temperature: f32,
}

/// Single-shot image generation.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRequest {
    pub prompt: String,
    pub aspect_ratio: String,
}

/// One part of a provider response.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentPart {
    Text(String),
    InlineData { mime_type: String, data: String },
}

/// Remote generative content provider.
///
/// Implementations only translate requests into remote calls and back; they
/// do not retry, cache or substitute fallbacks.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Returns the completion text, or `None` when the provider produced none.
    async fn complete_text(&self, request: TextRequest) -> Result<Option<String>>;

    /// Returns every part of the first candidate, in order.
    async fn render_image(&self, request: ImageRequest) -> Result<Vec<ContentPart>>;
}
