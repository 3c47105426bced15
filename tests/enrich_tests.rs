//! AI enrichment tests
//!
//! Request building, reply decoding and merging, using an in-process backend
//! in place of the HTTP client.

use std::cell::RefCell;

use serde_json::json;

use sophia::enrich::{
    decode_response, resolve_api_key, ChatRequest, CompletionBackend, EnrichConfig,
    EnrichRequest, Enricher,
};
use sophia::{
    AiGeneratedContent, AnswerSet, AnswerValue, Blueprint, BlueprintCompiler, Catalogue,
    EnrichError, EnrichedBlueprint,
};

/// Returns a canned reply and records every request
struct StubBackend {
    reply: Result<String, fn() -> EnrichError>,
    requests: RefCell<Vec<ChatRequest>>,
}

impl StubBackend {
    fn replying(reply: serde_json::Value) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            requests: RefCell::new(Vec::new()),
        }
    }

    fn raw(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            requests: RefCell::new(Vec::new()),
        }
    }

    fn failing(error: fn() -> EnrichError) -> Self {
        Self {
            reply: Err(error),
            requests: RefCell::new(Vec::new()),
        }
    }
}

impl CompletionBackend for StubBackend {
    fn complete(&self, request: &ChatRequest) -> Result<String, EnrichError> {
        self.requests.borrow_mut().push(request.clone());
        match &self.reply {
            Ok(content) => Ok(content.clone()),
            Err(make) => Err(make()),
        }
    }
}

fn blueprint(depth: &str) -> Blueprint {
    let catalogue = Catalogue::builtin();
    let answers: AnswerSet = [
        ("transfer_objective", AnswerValue::single("Give actionable feedback")),
        ("depth_level", AnswerValue::single(depth)),
        ("tone", AnswerValue::single("motivational")),
        ("teaching_strategy", AnswerValue::single("blended")),
        ("duration", AnswerValue::single("4h")),
    ]
    .into_iter()
    .collect();
    BlueprintCompiler::new(&catalogue).compile(&answers)
}

fn ai_module(number: u32, title: &str) -> serde_json::Value {
    json!({
        "number": number,
        "title": title,
        "objective": "Objective",
        "duration": "1h",
        "content": "Detailed content",
        "activities": ["Activity one", "Activity two", "Activity three"],
        "assessment": "Assessment",
        "speakerNotes": "Notes"
    })
}

// =============================================================================
// Request
// =============================================================================

mod request_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_request_with_configured_parameters() {
        let backend = StubBackend::replying(json!({
            "title": "Feedback That Lands",
            "modules": [ai_module(1, "Why feedback"), ai_module(2, "SBI model"), ai_module(3, "My plan")]
        }));
        let enricher = Enricher::new(EnrichConfig::default(), backend);
        let content = enricher.enrich(&blueprint("know")).unwrap();

        assert_eq!(content.modules.len(), 3);
        let requests = enricher.backend().requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, "gpt-4o");
        assert_eq!(requests[0].temperature, 0.7);
    }

    #[test]
    fn test_request_carries_prompts() {
        let config = EnrichConfig {
            model: "gpt-4o-mini".to_string(),
            ..EnrichConfig::default()
        };
        let request = ChatRequest::for_blueprint(&config, &blueprint("apply")).unwrap();

        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.max_tokens, 4000);
        assert_eq!(request.response_format.format_type, "json_object");
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, "system");
        assert!(request.messages[0].content.contains("The tone must be: Motivational."));
        assert!(request.messages[1]
            .content
            .contains("- Module 3: Practical Application (1h) — "));
    }

    #[test]
    fn test_uploaded_file_names_in_prompt() {
        let catalogue = Catalogue::builtin();
        let mut attachments = sophia::Attachments::new();
        attachments.attach(
            "cited_references",
            sophia::uploads::ingest_bytes("ethics-code.pdf", b"%PDF").unwrap(),
        );
        let blueprint = BlueprintCompiler::new(&catalogue)
            .compile_with_attachments(&AnswerSet::new(), &attachments);

        let prompt = sophia::enrich::prompt::user_prompt(&blueprint).unwrap();
        assert!(prompt.contains("UPLOADED DOCUMENTS: ethics-code.pdf"));
    }

    #[test]
    fn test_request_wrapper_shape() {
        let request = EnrichRequest {
            blueprint: blueprint("know"),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["blueprint"]["title"], "Course: Give actionable feedback");
    }
}

// =============================================================================
// Errors
// =============================================================================

mod error_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_placeholder_key_is_configuration_error() {
        let err = resolve_api_key(Some("sk-your-api-key-here"), "OPENAI_API_KEY").unwrap_err();
        assert!(matches!(err, EnrichError::Configuration(_)));
        assert_eq!(
            err.to_error_body().error,
            "OpenAI API key not configured. Add OPENAI_API_KEY to your .env.local file"
        );
    }

    #[test]
    fn test_missing_key_fails_before_network() {
        let config = EnrichConfig {
            api_key_env: "SOPHIA_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            // Unroutable, so any request attempt would fail differently
            base_url: "http://127.0.0.1:9".to_string(),
            ..EnrichConfig::default()
        };
        assert!(matches!(
            Enricher::from_env(config),
            Err(EnrichError::Configuration(_))
        ));
    }

    #[test]
    fn test_upstream_error_is_reported_once() {
        let backend = StubBackend::failing(|| EnrichError::Upstream {
            status: 429,
            body: "rate limited".to_string(),
        });
        let enricher = Enricher::new(EnrichConfig::default(), backend);
        let err = enricher.enrich(&blueprint("know")).unwrap_err();

        assert_eq!(enricher.backend().requests.borrow().len(), 1);
        assert_eq!(
            err.to_string(),
            "AI generation error: OpenAI API error (status 429): rate limited"
        );
    }

    #[test]
    fn test_blank_reply_is_empty_response() {
        let enricher = Enricher::new(EnrichConfig::default(), StubBackend::raw("  "));
        assert!(matches!(
            enricher.enrich(&blueprint("know")),
            Err(EnrichError::EmptyResponse)
        ));
    }

    #[test]
    fn test_reply_missing_fields_is_rejected() {
        let mut module = ai_module(1, "Intro");
        module.as_object_mut().unwrap().remove("speakerNotes");
        let reply = json!({ "title": "T", "modules": [module] }).to_string();

        assert!(matches!(
            decode_response(&reply),
            Err(EnrichError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_reply_with_wrong_types_is_rejected() {
        let mut module = ai_module(1, "Intro");
        module["activities"] = json!("not a list");
        let reply = json!({ "title": "T", "modules": [module] }).to_string();

        let err = decode_response(&reply).unwrap_err();
        assert!(err.to_string().starts_with("AI generation error: "));
    }
}

// =============================================================================
// Merge
// =============================================================================

mod merge_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_merge_keeps_count_and_order() {
        let original = blueprint("solve");
        let content: AiGeneratedContent = serde_json::from_value(json!({
            "title": "Feedback Mastery",
            "modules": [
                ai_module(3, "Practice lab"),
                ai_module(1, "Why feedback"),
                ai_module(9, "Bonus module")
            ]
        }))
        .unwrap();

        let enriched = EnrichedBlueprint::merge(&original, &content);

        assert_eq!(enriched.title, "Feedback Mastery");
        assert_eq!(enriched.modules.len(), original.modules.len());
        let numbers: Vec<u32> = enriched.modules.iter().map(|m| m.number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);

        assert_eq!(enriched.modules[0].title, "Why feedback");
        assert_eq!(enriched.modules[2].title, "Practice lab");
        assert_eq!(enriched.modules[0].speaker_notes, "Notes");

        // No generated counterpart: compiled fields, empty content
        assert_eq!(enriched.modules[1].title, original.modules[1].title);
        assert_eq!(enriched.modules[1].activities, original.modules[1].activities);
        assert!(enriched.modules[1].content.is_empty());
        assert!(enriched.modules[1].speaker_notes.is_empty());
    }

    #[test]
    fn test_merge_leaves_blueprint_untouched() {
        let original = blueprint("know");
        let before = original.clone();
        let backend = StubBackend::replying(json!({
            "title": "New title",
            "modules": [ai_module(1, "A"), ai_module(2, "B"), ai_module(3, "C")]
        }));

        let enriched = Enricher::new(EnrichConfig::default(), backend)
            .enrich_blueprint(&original)
            .unwrap();

        assert_eq!(original, before);
        assert_eq!(enriched.blueprint, before);
        assert_eq!(enriched.modules[2].title, "C");
    }

    #[test]
    fn test_enriched_json_uses_camel_case() {
        let original = blueprint("know");
        let content = AiGeneratedContent {
            title: "T".to_string(),
            modules: vec![],
        };
        let json = EnrichedBlueprint::merge(&original, &content)
            .to_json_pretty()
            .unwrap();
        assert!(json.contains("\"speakerNotes\""));
    }
}
