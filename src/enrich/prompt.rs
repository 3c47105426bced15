//! @acp:module "Enrichment Prompts"
//! @acp:summary "Handlebars templates for the system and user prompts"
//! @acp:domain enrich
//! @acp:layer template

use handlebars::Handlebars;
use serde_json::json;

use crate::blueprint::Blueprint;

use super::EnrichError;

const SYSTEM_TEMPLATE: &str = r#"You are a Learning Architect experienced in instructional design based on the Understanding by Design (UbD) framework.
Your task is to enrich a training course blueprint with detailed, implementation-ready content.

You must answer ONLY with valid JSON, without markdown, comments or extra text.

For each course module, generate:
- "title": module title (you may improve it)
- "objective": specific, operational objective
- "duration": estimated duration
- "content": detailed module content (3-5 paragraphs) as plain text, with key concepts, practical examples and discussion points
- "activities": array of 3-5 specific, detailed learning activities
- "assessment": detailed description of how learning is assessed
- "speakerNotes": notes for the facilitator (practical tips, timing, transitions)

The tone must be: {{tone}}.
The dominant teaching strategy is: {{strategy}}.

IMPORTANT: Answer ONLY with a JSON object with this structure:
{
  "title": "improved course title",
  "modules": [{ "number": 1, "title": "...", "objective": "...", "duration": "...", "content": "...", "activities": ["..."], "assessment": "...", "speakerNotes": "..." }]
}"#;

const USER_TEMPLATE: &str = r#"Here is the course blueprint to enrich:

TITLE: {{b.title}}
TRANSFER OBJECTIVE: {{b.transferObjective}}
BUSINESS OBJECTIVE: {{b.businessObjective}}
DEPTH LEVEL: {{b.depthLevel}}
ASSESSMENT METHODS: {{assessments}}
SHORT-TERM KPI: {{b.shortTermKPI}}
LONG-TERM KPI: {{b.longTermKPI}}
LEARNER PROFILE: {{b.learnerProfile}}
EXPECTED RESISTANCE: {{b.resistanceReasons}}
REAL SCENARIOS: {{b.scenarios}}
EXCLUDED CONTENT: {{b.excludedContent}}
INCLUDED DOCUMENTS: {{b.includedReferences}}
DOCUMENTS TO CITE: {{b.citedReferences}}
TOTAL DURATION: {{b.duration}}
TONE: {{b.toneOfVoice}}
TEACHING STRATEGY: {{b.teachingStrategy}}

CURRENT MODULES:
{{#each b.modules}}
- Module {{number}}: {{title}} ({{duration}}) — {{objective}}
{{/each}}
{{#if uploads}}

UPLOADED DOCUMENTS: {{uploads}}
{{/if}}

Generate the detailed content for every module. Keep the same number of modules. Answer ONLY in JSON."#;

fn registry() -> Handlebars<'static> {
    let mut handlebars = Handlebars::new();
    // Prompts are plain text
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars.set_strict_mode(true);
    handlebars
}

/// Instructions carrying the blueprint's tone and strategy
pub fn system_prompt(blueprint: &Blueprint) -> Result<String, EnrichError> {
    registry()
        .render_template(
            SYSTEM_TEMPLATE,
            &json!({
                "tone": blueprint.tone_of_voice,
                "strategy": blueprint.teaching_strategy,
            }),
        )
        .map_err(|e| EnrichError::Prompt(e.to_string()))
}

/// Every blueprint field, the module list and any uploaded file names
pub fn user_prompt(blueprint: &Blueprint) -> Result<String, EnrichError> {
    let uploads = blueprint.uploaded_file_names().join(", ");
    registry()
        .render_template(
            USER_TEMPLATE,
            &json!({
                "b": blueprint,
                "assessments": blueprint.assessment_methods.join(", "),
                "uploads": uploads,
            }),
        )
        .map_err(|e| EnrichError::Prompt(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::{AnswerSet, AnswerValue};
    use crate::blueprint::BlueprintCompiler;
    use crate::catalogue::Catalogue;

    fn blueprint() -> Blueprint {
        let catalogue = Catalogue::builtin();
        let answers: AnswerSet = [
            ("transfer_objective", AnswerValue::single("Run fair & honest reviews")),
            ("tone", AnswerValue::single("practical")),
            ("teaching_strategy", AnswerValue::single("flipped")),
            ("depth_level", AnswerValue::single("apply")),
        ]
        .into_iter()
        .collect();
        BlueprintCompiler::new(&catalogue).compile(&answers)
    }

    #[test]
    fn test_system_prompt_names_tone_and_strategy() {
        let prompt = system_prompt(&blueprint()).unwrap();
        assert!(prompt.contains("The tone must be: Practical."));
        assert!(prompt.contains("The dominant teaching strategy is: Flipped Classroom."));
    }

    #[test]
    fn test_user_prompt_lists_modules_unescaped() {
        let prompt = user_prompt(&blueprint()).unwrap();
        assert!(prompt.contains("TITLE: Course: Run fair & honest reviews"));
        assert!(prompt.contains("- Module 1: Context & Objectives (1.2h) — "));
        assert!(prompt.contains("- Module 4: Personal Action Plan (48 min) — "));
        assert!(!prompt.contains("UPLOADED DOCUMENTS"));
        assert!(prompt.contains("Keep the same number of modules."));
    }
}
