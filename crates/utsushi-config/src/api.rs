use serde::{Deserialize, Serialize};

fn default_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_system_prompt() -> String {
    "Translate all text in the image into Simplified Chinese. \
     Reply only with 'translated text (original text)' and nothing else."
        .to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

/// Vision chat-completions endpoint used for translation
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            api_key: String::new(),
            system_prompt: default_system_prompt(),
            model: default_model(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}
