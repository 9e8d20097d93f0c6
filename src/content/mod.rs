//! Content adapters: one function per modality, each wrapping a single
//! provider call with a fixed prompt for the given day.

pub mod prompts;

use anyhow::{anyhow, Result};
use base64::{engine::general_purpose::STANDARD as B64, Engine as _};
use serde::{Deserialize, Serialize};

use crate::{
    provider::{ContentPart, ContentProvider, ImageRequest, TextRequest},
    week::DayOfWeek,
};

/// Shown in place of the post when the provider answers with no text.
pub const TEXT_FALLBACK: &str = "No se pudo generar el texto.";

pub const NO_IMAGE_MESSAGE: &str = "No se pudo generar la imagen";

/// Inline images are always tagged with this type, whatever the provider says.
pub const IMAGE_MIME_TYPE: &str = "image/png";

pub const TEXT_TEMPERATURE: f32 = 0.8;

pub const IMAGE_ASPECT_RATIO: &str = "1:1";

/// Base64 image payload ready for inline display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    pub mime_type: String,
    pub data: String,
}

impl ImageRef {
    pub fn png(data: impl Into<String>) -> Self {
        Self {
            mime_type: IMAGE_MIME_TYPE.to_string(),
            data: data.into(),
        }
    }

    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// Generates the promotional copy for `day`.
///
/// An empty answer becomes [`TEXT_FALLBACK`]; provider failures propagate.
pub async fn generate_post_text(
    provider: &dyn ContentProvider,
    day: DayOfWeek,
) -> Result<String> {
    let request = TextRequest {
        prompt: prompts::post_text_prompt(day),
        temperature: TEXT_TEMPERATURE,
    };

    let text = provider
        .complete_text(request)
        .await?
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| TEXT_FALLBACK.to_string());
    Ok(text)
}

/// Generates the square studio image for `day`.
///
/// Fails when no returned part carries decodable inline data.
pub async fn generate_post_image(
    provider: &dyn ContentProvider,
    day: DayOfWeek,
) -> Result<ImageRef> {
    let request = ImageRequest {
        prompt: prompts::post_image_prompt(day),
        aspect_ratio: IMAGE_ASPECT_RATIO.to_string(),
    };

    let mut caption = None;
    let mut payload = None;
    for part in provider.render_image(request).await? {
        match part {
            ContentPart::InlineData { data, .. } => {
                payload = Some(data);
                break;
            }
            ContentPart::Text(text) => {
                caption.get_or_insert(text);
            }
        }
    }

    let data = match payload {
        Some(data) => data,
        None => {
            if let Some(caption) = caption {
                log::warn!("Image model answered for {} without an image: {}", day, caption);
            }
            return Err(anyhow!(NO_IMAGE_MESSAGE));
        }
    };

    B64.decode(data.as_bytes())
        .map_err(|err| anyhow!("{NO_IMAGE_MESSAGE}: malformed image payload ({err})"))?;

    Ok(ImageRef::png(data))
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[tokio::test]
    async fn text_uses_day_prompt_and_fixed_temperature() {
        let provider = ScriptedProvider::ok("¡Feliz jueves! 🎶");

        let text = generate_post_text(&provider, DayOfWeek::Thursday)
            .await
            .unwrap();

        assert_eq!(text, "¡Feliz jueves! 🎶");
        match &provider.calls()[0] {
            Call::Text(request) => {
                assert_eq!(request.temperature, 0.8);
                assert!(request.prompt.contains("Jueves"));
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_text_falls_back() {
        let provider = ScriptedProvider::new().with_text(Reply::Ok(None));
        let text = generate_post_text(&provider, DayOfWeek::Monday)
            .await
            .unwrap();
        assert_eq!(text, TEXT_FALLBACK);

        let provider = ScriptedProvider::new().with_text(Reply::Ok(Some("   ".into())));
        let text = generate_post_text(&provider, DayOfWeek::Monday)
            .await
            .unwrap();
        assert_eq!(text, TEXT_FALLBACK);
    }

    #[tokio::test]
    async fn text_failure_propagates() {
        let provider = ScriptedProvider::new().with_text(Reply::Fail("quota exceeded"));
        let err = generate_post_text(&provider, DayOfWeek::Monday)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[tokio::test]
    async fn image_takes_first_inline_part_as_png() {
        let provider = ScriptedProvider::new().with_image(Reply::Ok(vec![
            ContentPart::Text("caption".into()),
            ContentPart::InlineData {
                mime_type: "image/jpeg".into(),
                data: PNG_B64.into(),
            },
            ContentPart::InlineData {
                mime_type: "image/png".into(),
                data: "c2Vjb25k".into(),
            },
        ]));

        let image = generate_post_image(&provider, DayOfWeek::Friday)
            .await
            .unwrap();

        assert_eq!(image, ImageRef::png(PNG_B64));
        assert_eq!(image.data_url(), format!("data:image/png;base64,{PNG_B64}"));
        match &provider.calls()[0] {
            Call::Image(request) => assert_eq!(request.aspect_ratio, "1:1"),
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[tokio::test]
    async fn image_without_inline_data_fails() {
        let provider =
            ScriptedProvider::new().with_image(Reply::Ok(vec![ContentPart::Text("sorry".into())]));
        let err = generate_post_image(&provider, DayOfWeek::Friday)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), NO_IMAGE_MESSAGE);
    }

    #[tokio::test]
    async fn malformed_image_payload_fails() {
        let provider = ScriptedProvider::new().with_image(Reply::Ok(vec![ContentPart::InlineData {
            mime_type: "image/png".into(),
            data: "***not base64***".into(),
        }]));
        let err = generate_post_image(&provider, DayOfWeek::Friday)
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with(NO_IMAGE_MESSAGE));
    }

    #[tokio::test]
    async fn every_day_requests_square_image_and_same_temperature() {
        for day in DayOfWeek::ALL {
            let provider = ScriptedProvider::ok("texto");
            generate_post_text(&provider, day).await.unwrap();
            generate_post_image(&provider, day).await.unwrap();

            assert_eq!(
                provider.calls(),
                vec![
                    Call::Text(TextRequest {
                        prompt: prompts::post_text_prompt(day),
                        temperature: 0.8,
                    }),
                    Call::Image(ImageRequest {
                        prompt: prompts::post_image_prompt(day),
                        aspect_ratio: "1:1".into(),
                    }),
                ]
            );
        }
    }
}
