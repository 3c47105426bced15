//! @acp:module "AI Enrichment"
//! @acp:summary "Single chat-completion call that expands a blueprint into detailed course content"
//! @acp:domain enrich
//! @acp:layer service
//!
//! # AI Enrichment
//!
//! Enrichment is optional and never feeds back into compilation. A compiled
//! [`Blueprint`] is rendered into a system and a user prompt, sent once to a
//! [`CompletionBackend`], and the reply is schema-checked before it is decoded
//! into [`AiGeneratedContent`]. The result is merged into an
//! [`EnrichedBlueprint`] that keeps the original module count and order.
//!
//! There is no retry: a failure is reported once and the caller may try again.

pub mod openai;
pub mod prompt;

pub use openai::OpenAiBackend;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::blueprint::{Blueprint, CourseModule};
use crate::config::PLACEHOLDER_API_KEY;
use crate::schema::{self, SchemaKind};

pub use crate::config::EnrichConfig;

/// @acp:summary "Failures of the enrichment call, each rendered as one user-facing string"
#[derive(Debug, Error)]
pub enum EnrichError {
    /// Credentials missing; raised before any network activity
    #[error("{0}")]
    Configuration(String),

    #[error("AI generation error: OpenAI API error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("No response from the AI")]
    EmptyResponse,

    #[error("AI generation error: {0}")]
    MalformedResponse(String),

    #[error("AI generation error: {0}")]
    Transport(String),

    #[error("AI generation error: failed to render prompt: {0}")]
    Prompt(String),
}

impl EnrichError {
    pub fn to_error_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
        }
    }
}

/// Request shape of the enrichment service boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichRequest {
    pub blueprint: Blueprint,
}

/// Error shape of the enrichment service boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Check the configured API key.
///
/// Absent, blank and placeholder keys are configuration errors.
pub fn resolve_api_key(value: Option<&str>, env_var: &str) -> Result<String, EnrichError> {
    match value.map(str::trim) {
        Some(key) if !key.is_empty() && key != PLACEHOLDER_API_KEY => Ok(key.to_string()),
        _ => Err(EnrichError::Configuration(format!(
            "OpenAI API key not configured. Add {} to your .env.local file",
            env_var
        ))),
    }
}

/// One chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: String,
}

/// Chat-completion request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub response_format: ResponseFormat,
}

impl ChatRequest {
    /// System + user prompt for one blueprint, asking for a JSON object reply
    pub fn for_blueprint(config: &EnrichConfig, blueprint: &Blueprint) -> Result<Self, EnrichError> {
        Ok(Self {
            model: config.model.clone(),
            messages: vec![
                ChatMessage::system(prompt::system_prompt(blueprint)?),
                ChatMessage::user(prompt::user_prompt(blueprint)?),
            ],
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
        })
    }
}

/// @acp:summary "Anything that can answer a chat-completion request with raw content"
pub trait CompletionBackend {
    /// Send the request and return the first choice's message content
    fn complete(&self, request: &ChatRequest) -> Result<String, EnrichError>;
}

/// Detailed content for one module, as returned by the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiModule {
    pub number: u32,
    pub title: String,
    pub objective: String,
    pub duration: String,
    pub content: String,
    pub activities: Vec<String>,
    pub assessment: String,
    pub speaker_notes: String,
}

/// @acp:summary "Decoded model reply"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiGeneratedContent {
    pub title: String,
    pub modules: Vec<AiModule>,
}

/// Parse, schema-check and decode a model reply.
///
/// Fails closed: a reply missing any required field is rejected rather
/// than partially accepted.
pub fn decode_response(content: &str) -> Result<AiGeneratedContent, EnrichError> {
    let value: serde_json::Value = serde_json::from_str(content)
        .map_err(|e| EnrichError::MalformedResponse(format!("reply is not valid JSON: {}", e)))?;

    schema::validate_value(&value, SchemaKind::Enrichment)
        .map_err(|e| EnrichError::MalformedResponse(e.to_string()))?;

    serde_json::from_value(value).map_err(|e| EnrichError::MalformedResponse(e.to_string()))
}

/// @acp:summary "Runs the enrichment call against a backend"
pub struct Enricher<B: CompletionBackend> {
    config: EnrichConfig,
    backend: B,
}

impl<B: CompletionBackend> Enricher<B> {
    pub fn new(config: EnrichConfig, backend: B) -> Self {
        Self { config, backend }
    }

    pub fn config(&self) -> &EnrichConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// One request, one decoded reply
    pub fn enrich(&self, blueprint: &Blueprint) -> Result<AiGeneratedContent, EnrichError> {
        let request = ChatRequest::for_blueprint(&self.config, blueprint)?;
        tracing::info!(
            "Requesting enrichment of '{}' ({} modules) from {}",
            blueprint.title,
            blueprint.modules.len(),
            self.config.model
        );

        let content = self.backend.complete(&request)?;
        if content.trim().is_empty() {
            return Err(EnrichError::EmptyResponse);
        }
        decode_response(&content)
    }

    /// Enrich and merge into a parallel record
    pub fn enrich_blueprint(&self, blueprint: &Blueprint) -> Result<EnrichedBlueprint, EnrichError> {
        let content = self.enrich(blueprint)?;
        Ok(EnrichedBlueprint::merge(blueprint, &content))
    }
}

impl Enricher<OpenAiBackend> {
    /// Build an OpenAI-backed enricher, reading the key from the environment.
    ///
    /// Key problems surface here, before any request is made.
    pub fn from_env(config: EnrichConfig) -> Result<Self, EnrichError> {
        let raw = config.api_key_from_env();
        let key = resolve_api_key(raw.as_deref(), &config.api_key_env)?;
        let backend = OpenAiBackend::new(&config, key);
        Ok(Self::new(config, backend))
    }
}

/// One module with both compiled and generated content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedModule {
    pub number: u32,
    pub title: String,
    pub objective: String,
    pub duration: String,
    pub content: String,
    pub activities: Vec<String>,
    pub assessment: String,
    pub speaker_notes: String,
}

impl EnrichedModule {
    fn from_ai(module: &AiModule) -> Self {
        Self {
            number: module.number,
            title: module.title.clone(),
            objective: module.objective.clone(),
            duration: module.duration.clone(),
            content: module.content.clone(),
            activities: module.activities.clone(),
            assessment: module.assessment.clone(),
            speaker_notes: module.speaker_notes.clone(),
        }
    }

    fn from_compiled(module: &CourseModule) -> Self {
        Self {
            number: module.number,
            title: module.title.clone(),
            objective: module.objective.clone(),
            duration: module.duration.clone(),
            content: String::new(),
            activities: module.activities.clone(),
            assessment: module.assessment.clone(),
            speaker_notes: String::new(),
        }
    }
}

/// @acp:summary "Blueprint plus generated content, kept side by side"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedBlueprint {
    pub title: String,
    pub modules: Vec<EnrichedModule>,
    /// The compiled blueprint, unchanged
    pub blueprint: Blueprint,
}

impl EnrichedBlueprint {
    /// Pair each compiled module with the generated module of the same number.
    ///
    /// The compiled module list decides count and order; generated modules
    /// with no compiled counterpart are dropped.
    pub fn merge(blueprint: &Blueprint, content: &AiGeneratedContent) -> Self {
        let modules = blueprint
            .modules
            .iter()
            .map(|module| {
                content
                    .modules
                    .iter()
                    .find(|ai| ai.number == module.number)
                    .map(|ai| EnrichedModule {
                        number: module.number,
                        ..EnrichedModule::from_ai(ai)
                    })
                    .unwrap_or_else(|| EnrichedModule::from_compiled(module))
            })
            .collect();

        let dropped = content
            .modules
            .iter()
            .filter(|ai| blueprint.module(ai.number).is_none())
            .count();
        if dropped > 0 {
            tracing::warn!("Ignoring {} generated modules with no compiled counterpart", dropped);
        }

        Self {
            title: content.title.clone(),
            modules,
            blueprint: blueprint.clone(),
        }
    }

    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_api_key() {
        assert!(resolve_api_key(Some("sk-live"), "OPENAI_API_KEY").is_ok());
        assert!(resolve_api_key(Some("  "), "OPENAI_API_KEY").is_err());
        assert!(resolve_api_key(None, "OPENAI_API_KEY").is_err());

        let err = resolve_api_key(Some(PLACEHOLDER_API_KEY), "OPENAI_API_KEY").unwrap_err();
        assert_eq!(
            err.to_string(),
            "OpenAI API key not configured. Add OPENAI_API_KEY to your .env.local file"
        );
    }

    #[test]
    fn test_error_body_carries_message() {
        let body = EnrichError::EmptyResponse.to_error_body();
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"error":"No response from the AI"}"#
        );
    }

    #[test]
    fn test_decode_rejects_non_json() {
        assert!(matches!(
            decode_response("Sure! Here is your course"),
            Err(EnrichError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_request_body_shape() {
        let request = ChatRequest {
            model: "gpt-4o".to_string(),
            messages: vec![ChatMessage::system("s"), ChatMessage::user("u")],
            temperature: 0.7,
            max_tokens: 4000,
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["response_format"]["type"], "json_object");
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["max_tokens"], 4000);
    }
}
