use utsushi_types::PipelineResult;

mod chat;

pub use chat::{ChatCompletionsTranslator, parse_completion};

/// Translates the text found in an image
#[async_trait::async_trait]
pub trait VisionTranslator: Send + Sync {
    /// `png_base64` is a base64 PNG without the `data:` prefix
    async fn translate_image(&self, png_base64: &str) -> Result<String, TranslateError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub model: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("API error: HTTP {status}")]
    Api { status: u16, body: String },

    #[error("API returned an empty response")]
    EmptyResponse,

    #[error("Network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for TranslateError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TranslateError::Network(format!("request timed out ({})", e))
        } else {
            TranslateError::Network(e.to_string())
        }
    }
}

impl From<TranslateError> for PipelineResult {
    fn from(e: TranslateError) -> Self {
        match e {
            TranslateError::Api { status, body } => PipelineResult::ApiError { status, body },
            TranslateError::EmptyResponse => PipelineResult::ApiEmptyResponse,
            TranslateError::Network(message) => PipelineResult::NetworkError(message),
        }
    }
}
