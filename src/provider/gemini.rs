use std::{sync::Arc, time::Duration};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    log_info,
    settings::{api_key_from_env, SettingsStore},
};

use super::{ContentPart, ContentProvider, ImageRequest, TextRequest};

const ENABLE_LOGS: bool = true;

pub const TEXT_MODEL: &str = "gemini-3-flash-preview";
pub const IMAGE_MODEL: &str = "gemini-2.5-flash-image";

// ----------------------------------------------------------------------------
// Wire types for `models/{model}:generateContent`
// ----------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentBody<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_config: Option<ImageConfig<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig<'a> {
    aspect_ratio: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ResponsePart {
    text: Option<String>,
    inline_data: Option<InlineData>,
    /// Reasoning summaries are not part of the answer text.
    thought: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default)]
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

impl GenerateContentResponse {
    fn first_candidate_parts(self) -> Vec<ResponsePart> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| content.parts)
            .unwrap_or_default()
    }

    /// Concatenated answer text of the first candidate, `None` when empty.
    fn text(self) -> Option<String> {
        let text: String = self
            .first_candidate_parts()
            .into_iter()
            .filter(|part| part.thought != Some(true))
            .filter_map(|part| part.text)
            .collect();

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    fn parts(self) -> Vec<ContentPart> {
        self.first_candidate_parts()
            .into_iter()
            .filter_map(|part| match (part.inline_data, part.text) {
                (Some(inline), _) => Some(ContentPart::InlineData {
                    mime_type: inline.mime_type,
                    data: inline.data,
                }),
                (None, Some(text)) => Some(ContentPart::Text(text)),
                (None, None) => None,
            })
            .collect()
    }
}

fn describe_error_body(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => format!(
            "provider returned {status} ({}): {}",
            envelope.error.status, envelope.error.message
        ),
        _ => format!("provider returned {status}"),
    }
}

// ----------------------------------------------------------------------------
// Client
// ----------------------------------------------------------------------------

/// HTTP client for the Generative Language API.
///
/// Transport settings and the API key are read on every call, so edits made
/// through the settings commands apply to the next generation without a restart.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    settings: Arc<SettingsStore>,
}

impl GeminiClient {
    pub fn new(settings: Arc<SettingsStore>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { http, settings })
    }

    async fn generate_content(
        &self,
        model: &str,
        body: &GenerateContentBody<'_>,
    ) -> Result<GenerateContentResponse> {
        let settings = self.settings.provider();
        let api_key = api_key_from_env()?;
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            settings.api_base_url.trim_end_matches('/'),
            model
        );

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .json(body)
            .send()
            .await
            .with_context(|| format!("request to model {model} failed"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!(describe_error_body(status, &body)));
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .with_context(|| format!("invalid response from model {model}"))
    }
}

#[async_trait]
impl ContentProvider for GeminiClient {
    async fn complete_text(&self, request: TextRequest) -> Result<Option<String>> {
        let model = TEXT_MODEL;
        let body = GenerateContentBody {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: &request.prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: Some(request.temperature),
                ..Default::default()
            },
        };

        log_info!("Requesting post text from {}", model);
        let response = self.generate_content(model, &body).await?;
        Ok(response.text())
    }

    async fn render_image(&self, request: ImageRequest) -> Result<Vec<ContentPart>> {
        let model = IMAGE_MODEL;
        let body = GenerateContentBody {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: &request.prompt }],
            }],
            generation_config: GenerationConfig {
                image_config: Some(ImageConfig {
                    aspect_ratio: &request.aspect_ratio,
                }),
                ..Default::default()
            },
        };

        log_info!(
            "Requesting post image from {} (aspect {})",
            model,
            request.aspect_ratio
        );
        let response = self.generate_content(model, &body).await?;
        Ok(response.parts())
    }
}
