//! @acp:module "Schema Validation"
//! @acp:summary "JSON schema checks for exported blueprints and AI replies"
//! @acp:domain cli
//! @acp:layer validation
//!
//! Schemas are compiled into the binary so validation never depends on the
//! working directory.

use std::fmt;

use serde_json::Value;

use crate::error::{Result, SophiaError};

const BLUEPRINT_SCHEMA: &str = include_str!("../../schemas/blueprint.schema.json");
const ENRICHMENT_SCHEMA: &str = include_str!("../../schemas/enrichment.schema.json");

/// Documents the tool knows how to validate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    Blueprint,
    Enrichment,
}

impl SchemaKind {
    fn source(&self) -> &'static str {
        match self {
            SchemaKind::Blueprint => BLUEPRINT_SCHEMA,
            SchemaKind::Enrichment => ENRICHMENT_SCHEMA,
        }
    }

    /// Guess the document kind from its shape.
    ///
    /// Exported blueprints carry the questionnaire fields; an AI reply is
    /// just a title plus modules.
    pub fn detect(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        if object.contains_key("transferObjective") {
            Some(SchemaKind::Blueprint)
        } else if object.contains_key("modules") {
            Some(SchemaKind::Enrichment)
        } else {
            None
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaKind::Blueprint => write!(f, "blueprint"),
            SchemaKind::Enrichment => write!(f, "enrichment"),
        }
    }
}

/// Validate a parsed document, collecting every violation into one message
pub fn validate_value(value: &Value, kind: SchemaKind) -> Result<()> {
    let schema: Value = serde_json::from_str(kind.source())?;
    let validator = jsonschema::validator_for(&schema)
        .map_err(|e| SophiaError::Schema(format!("invalid {} schema: {}", kind, e)))?;

    let errors: Vec<String> = validator
        .iter_errors(value)
        .map(|e| {
            let path = e.instance_path.to_string();
            if path.is_empty() {
                e.to_string()
            } else {
                format!("{}: {}", path, e)
            }
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(SophiaError::Schema(format!(
            "{} document: {}",
            kind,
            errors.join("; ")
        )))
    }
}

/// Parse and validate a JSON string
pub fn validate_str(content: &str, kind: SchemaKind) -> Result<Value> {
    let value: Value = serde_json::from_str(content)?;
    validate_value(&value, kind)?;
    Ok(value)
}

/// Parse, detect the kind and validate
pub fn validate_detected(content: &str) -> Result<SchemaKind> {
    let value: Value = serde_json::from_str(content)?;
    let kind = SchemaKind::detect(&value).ok_or_else(|| {
        SophiaError::Schema(
            "unknown document: expected a blueprint or an AI generated content reply".to_string(),
        )
    })?;
    validate_value(&value, kind)?;
    Ok(kind)
}
