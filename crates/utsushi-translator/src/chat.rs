use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use utsushi_config::api::ApiConfig;

use crate::{ProviderMetadata, TranslateError, VisionTranslator};

/// OpenAI-compatible `/chat/completions` endpoint with image input
#[derive(Clone)]
pub struct ChatCompletionsTranslator {
    client: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
    system_prompt: String,
}

impl ChatCompletionsTranslator {
    pub fn new(api: &ApiConfig) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(api.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            url: api.url.clone(),
            api_key: api.api_key.clone(),
            model: api.model.clone(),
            system_prompt: api.system_prompt.clone(),
        })
    }

    fn request_body<'a>(&'a self, data_url: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(&self.system_prompt),
                },
                ChatMessage {
                    role: "user",
                    content: MessageContent::Parts(vec![
                        ContentPart::Text {
                            text: &self.system_prompt,
                        },
                        ContentPart::ImageUrl {
                            image_url: ImageUrl { url: data_url },
                        },
                    ]),
                },
            ],
        }
    }
}

#[async_trait]
impl VisionTranslator for ChatCompletionsTranslator {
    async fn translate_image(&self, png_base64: &str) -> Result<String, TranslateError> {
        let data_url = format!("data:image/png;base64,{}", png_base64);
        let body = self.request_body(&data_url);

        tracing::info!("[TRANSLATOR] Sending request to {} ({})", self.url, self.model);
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let text = response.text().await?;
        parse_completion(status, &text)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "chat-completions".to_string(),
            model: self.model.clone(),
        }
    }
}

/// Classify an HTTP response: `choices[0].message.content` on 200, errors otherwise
pub fn parse_completion(status: u16, body: &str) -> Result<String, TranslateError> {
    if status != 200 {
        tracing::warn!("[TRANSLATOR] HTTP {}: {}", status, body);
        return Err(TranslateError::Api {
            status,
            body: body.to_string(),
        });
    }

    let json: serde_json::Value = match serde_json::from_str(body) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!("[TRANSLATOR] Unparseable response body: {}", e);
            return Err(TranslateError::EmptyResponse);
        }
    };

    match json["choices"][0]["message"]["content"].as_str() {
        Some(content) if !content.trim().is_empty() => Ok(content.to_string()),
        _ => {
            tracing::warn!("[TRANSLATOR] Response carried no message content");
            Err(TranslateError::EmptyResponse)
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: MessageContent<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum MessageContent<'a> {
    Text(&'a str),
    Parts(Vec<ContentPart<'a>>),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl<'a> },
}

#[derive(Serialize)]
struct ImageUrl<'a> {
    url: &'a str,
}
