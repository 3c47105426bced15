//! @acp:module "OpenAI Backend"
//! @acp:summary "Blocking chat-completions client over ureq"
//! @acp:domain enrich
//! @acp:layer transport

use std::time::Duration;

use serde::Deserialize;

use super::{ChatRequest, CompletionBackend, EnrichConfig, EnrichError};

/// Generation of a long reply can take a while
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// @acp:summary "OpenAI-compatible chat-completions endpoint"
pub struct OpenAiBackend {
    agent: ureq::Agent,
    url: String,
    api_key: String,
}

impl OpenAiBackend {
    pub fn new(config: &EnrichConfig, api_key: String) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();
        Self {
            agent,
            url: config.completions_url(),
            api_key,
        }
    }
}

impl CompletionBackend for OpenAiBackend {
    fn complete(&self, request: &ChatRequest) -> Result<String, EnrichError> {
        tracing::debug!("POST {}", self.url);

        let response = self
            .agent
            .post(&self.url)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .set("User-Agent", concat!("sophia/", env!("CARGO_PKG_VERSION")))
            .send_json(request)
            .map_err(|e| match e {
                ureq::Error::Status(status, response) => EnrichError::Upstream {
                    status,
                    body: response.into_string().unwrap_or_default(),
                },
                ureq::Error::Transport(transport) => EnrichError::Transport(transport.to_string()),
            })?;

        let body: ChatResponse = response.into_json().map_err(|e| {
            EnrichError::MalformedResponse(format!("failed to parse OpenAI response: {}", e))
        })?;

        first_content(body).ok_or(EnrichError::EmptyResponse)
    }
}

fn first_content(body: ChatResponse) -> Option<String> {
    body.choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .filter(|content| !content.trim().is_empty())
}
