//! Content-generation collaborator: the trait the generators consult and an
//! OpenAI-compatible chat-completions client implementing it.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GenerateError;

/// Default chat model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default API base URL; `/v1/chat/completions` is appended.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Environment variable consulted when no key is passed explicitly.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// System instruction used when the caller passes none.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant that outputs concise Markdown.";

/// Anything that can turn a prompt into text.
pub trait ContentGenerator {
    /// One round trip. Fails when the remote call errors or yields no
    /// usable content.
    fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, GenerateError>;
}

/// Settings for [`ChatClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatClientOptions {
    pub model: String,
    pub base_url: String,
    /// Explicit key; falls back to [`API_KEY_ENV`] when `None`.
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for ChatClientOptions {
    fn default() -> Self {
        ChatClientOptions {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Blocking chat-completions client with bearer authentication.
#[derive(Debug, Clone)]
pub struct ChatClient {
    model: String,
    base_url: String,
    api_key: String,
    agent: ureq::Agent,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatClient {
    /// Build a client, reading [`API_KEY_ENV`] when `opts.api_key` is unset.
    pub fn new(opts: ChatClientOptions) -> Result<Self, GenerateError> {
        let env_key = std::env::var(API_KEY_ENV).ok();
        Self::with_env_key(opts, env_key)
    }

    /// Like [`ChatClient::new`] with the environment lookup supplied by the
    /// caller. A blank key counts as absent.
    pub fn with_env_key(
        opts: ChatClientOptions,
        env_key: Option<String>,
    ) -> Result<Self, GenerateError> {
        let api_key = opts
            .api_key
            .or(env_key)
            .filter(|k| !k.trim().is_empty())
            .ok_or(GenerateError::MissingApiKey { env: API_KEY_ENV })?;
        let agent = ureq::AgentBuilder::new().timeout(opts.timeout).build();
        Ok(ChatClient {
            model: opts.model,
            base_url: opts.base_url.trim_end_matches('/').to_string(),
            api_key,
            agent,
        })
    }

    /// Full URL of the chat-completions endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl ContentGenerator for ChatClient {
    fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, GenerateError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system.unwrap_or(DEFAULT_SYSTEM_PROMPT),
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: 0.2,
        };

        debug!(endpoint = %self.endpoint(), model = %self.model, "sending chat completion");
        let response = self
            .agent
            .post(&self.endpoint())
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .send_json(&request)
            .map_err(|e| match e {
                ureq::Error::Status(status, response) => GenerateError::Status {
                    status,
                    body: response.into_string().unwrap_or_default(),
                },
                ureq::Error::Transport(t) => GenerateError::Transport(t.to_string()),
            })?;

        let reply: ChatResponse = response
            .into_json()
            .map_err(|e| GenerateError::Malformed(format!("chat response: {e}")))?;
        reply
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(GenerateError::NoContent)
    }
}
