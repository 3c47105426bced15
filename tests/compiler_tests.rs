//! Blueprint compiler tests
//!
//! Module selection, duration allocation, activities, assessments, labels,
//! fallbacks and export round-trips.

use sophia::blueprint::{
    activities_for_strategy, Phase, CUSTOM_DURATION_FALLBACK, NO_DOCUMENTS_FALLBACK,
    NO_EXCLUSIONS_FALLBACK,
};
use sophia::{AnswerSet, AnswerValue, Blueprint, BlueprintCompiler, Catalogue, DepthTier};

fn full_answers(depth: &str) -> AnswerSet {
    [
        (
            "transfer_objective",
            AnswerValue::single("Handle customer complaints calmly and resolve them at first contact"),
        ),
        ("business_objective", AnswerValue::single("Reduce escalations by 20%")),
        ("depth_level", AnswerValue::single(depth)),
        ("assessment_methods", AnswerValue::multi(["quiz", "simulation"])),
        ("kpi_short", AnswerValue::single("Post-course quiz above 80%")),
        ("kpi_long", AnswerValue::single("NPS +5 in six months")),
        ("learner_profile", AnswerValue::single("Front-line support agents")),
        ("resistance", AnswerValue::single("No time for training")),
        ("scenarios", AnswerValue::single("Angry customer on the phone")),
        ("duration", AnswerValue::single("8h")),
        ("tone", AnswerValue::single("practical")),
        ("teaching_strategy", AnswerValue::single("scenario")),
    ]
    .into_iter()
    .collect()
}

fn compile(answers: &AnswerSet) -> Blueprint {
    let catalogue = Catalogue::builtin();
    BlueprintCompiler::new(&catalogue).compile(answers)
}

fn titles(blueprint: &Blueprint) -> Vec<&str> {
    blueprint.modules.iter().map(|m| m.title.as_str()).collect()
}

// =============================================================================
// Module selection
// =============================================================================

mod module_selection_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_know_tier_has_three_modules() {
        let blueprint = compile(&full_answers("know"));
        assert_eq!(
            titles(&blueprint),
            vec![
                "Context & Objectives",
                "Key Concepts & Framework",
                "Personal Action Plan"
            ]
        );
    }

    #[test]
    fn test_apply_tier_adds_application() {
        let blueprint = compile(&full_answers("apply"));
        assert_eq!(
            titles(&blueprint),
            vec![
                "Context & Objectives",
                "Key Concepts & Framework",
                "Practical Application",
                "Personal Action Plan"
            ]
        );
    }

    #[test]
    fn test_solve_tier_has_all_five() {
        let blueprint = compile(&full_answers("solve"));
        assert_eq!(
            titles(&blueprint),
            vec![
                "Context & Objectives",
                "Key Concepts & Framework",
                "Practical Application",
                "Complex Scenarios & Problem Solving",
                "Personal Action Plan"
            ]
        );
    }

    #[test]
    fn test_numbering_is_contiguous() {
        for depth in ["know", "apply", "solve"] {
            let blueprint = compile(&full_answers(depth));
            let numbers: Vec<u32> = blueprint.modules.iter().map(|m| m.number).collect();
            let expected: Vec<u32> = (1..=blueprint.modules.len() as u32).collect();
            assert_eq!(numbers, expected);
        }
    }

    #[test]
    fn test_unknown_depth_behaves_as_know() {
        let mut answers = full_answers("know");
        answers.set("depth_level", AnswerValue::single("master"));
        let blueprint = compile(&answers);
        assert_eq!(blueprint.modules.len(), 3);
        assert_eq!(blueprint.depth_level, "master");
    }
}

// =============================================================================
// Duration allocation
// =============================================================================

mod duration_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_day_solve_course() {
        let blueprint = compile(&full_answers("solve"));
        let durations: Vec<&str> = blueprint.modules.iter().map(|m| m.duration.as_str()).collect();
        assert_eq!(durations, vec!["1.2h", "2.4h", "2h", "1.6h", "48 min"]);
        assert_eq!(blueprint.duration, "8 hours (full day)");
    }

    #[test]
    fn test_two_hour_course_uses_minutes() {
        let mut answers = full_answers("solve");
        answers.set("duration", AnswerValue::single("2h"));
        let blueprint = compile(&answers);
        let durations: Vec<&str> = blueprint.modules.iter().map(|m| m.duration.as_str()).collect();
        assert_eq!(durations, vec!["18 min", "36 min", "30 min", "24 min", "15 min"]);
    }

    #[test]
    fn test_skipped_roles_keep_their_share() {
        // Know tier over 8h: 1.2h + 2.4h + 48 min, 4.4h of the 8h
        let blueprint = compile(&full_answers("know"));
        let durations: Vec<&str> = blueprint.modules.iter().map(|m| m.duration.as_str()).collect();
        assert_eq!(durations, vec!["1.2h", "2.4h", "48 min"]);
    }

    #[test]
    fn test_tier_weight_sums() {
        let sum = |tier: DepthTier| -> f64 { tier.roles().iter().map(|r| r.weight()).sum() };
        assert!((sum(DepthTier::Know) - 0.55).abs() < 1e-9);
        assert!((sum(DepthTier::Apply) - 0.80).abs() < 1e-9);
        assert!((sum(DepthTier::Solve) - 1.00).abs() < 1e-9);
    }

    #[test]
    fn test_custom_duration_text() {
        let mut answers = full_answers("know");
        answers.set("duration", AnswerValue::single("custom"));
        answers.set("duration_custom", AnswerValue::single("12 hours over 3 half days"));
        let blueprint = compile(&answers);
        assert_eq!(blueprint.duration, "12 hours over 3 half days");
        assert_eq!(blueprint.modules[0].duration, "1.8h");
        assert_eq!(blueprint.modules[1].duration, "3.6h");
    }

    #[test]
    fn test_one_decimal_hours_round_once() {
        let mut answers = full_answers("know");
        answers.set("duration", AnswerValue::single("custom"));

        answers.set("duration_custom", AnswerValue::single("11 hours"));
        assert_eq!(compile(&answers).modules[0].duration, "1.6h");

        answers.set("duration_custom", AnswerValue::single("13 hours"));
        assert_eq!(compile(&answers).modules[0].duration, "1.9h");
    }

    #[test]
    fn test_blank_custom_duration() {
        let mut answers = full_answers("know");
        answers.set("duration", AnswerValue::single("custom"));
        answers.set("duration_custom", AnswerValue::single(""));
        let blueprint = compile(&answers);
        assert_eq!(blueprint.duration, CUSTOM_DURATION_FALLBACK);
        // No digits: the default 8 hours apply
        assert_eq!(blueprint.modules[0].duration, "1.2h");
    }

    #[test]
    fn test_custom_text_ignored_without_sentinel() {
        let mut answers = full_answers("know");
        answers.set("duration_custom", AnswerValue::single("40 hours"));
        let blueprint = compile(&answers);
        assert_eq!(blueprint.duration, "8 hours (full day)");
        assert_eq!(blueprint.modules[0].duration, "1.2h");
    }
}

// =============================================================================
// Title, labels and fallbacks
// =============================================================================

mod field_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_long_objective_title_is_truncated() {
        let blueprint = compile(&full_answers("know"));
        assert_eq!(
            blueprint.title,
            "Course: Handle customer complaints calmly and resolve them at..."
        );
    }

    #[test]
    fn test_labels_are_resolved() {
        let blueprint = compile(&full_answers("apply"));
        assert_eq!(blueprint.depth_level, "Apply");
        assert_eq!(blueprint.tone_of_voice, "Practical");
        assert_eq!(blueprint.teaching_strategy, "Scenario-Based Learning");
        assert_eq!(
            blueprint.assessment_methods,
            vec!["Quiz", "Scenario Simulation"]
        );
    }

    #[test]
    fn test_unmatched_values_pass_through() {
        let mut answers = full_answers("know");
        answers.set("tone", AnswerValue::single("playful"));
        let blueprint = compile(&answers);
        assert_eq!(blueprint.tone_of_voice, "playful");
    }

    #[test]
    fn test_optional_fields_fall_back() {
        let blueprint = compile(&full_answers("know"));
        assert_eq!(blueprint.excluded_content, NO_EXCLUSIONS_FALLBACK);
        assert_eq!(blueprint.included_references, NO_DOCUMENTS_FALLBACK);
        assert_eq!(blueprint.cited_references, NO_DOCUMENTS_FALLBACK);
    }

    #[test]
    fn test_scalar_answer_for_multi_question() {
        let mut answers = full_answers("solve");
        answers.set("assessment_methods", AnswerValue::single("case"));
        let blueprint = compile(&answers);
        assert_eq!(blueprint.assessment_methods, vec!["Case Analysis"]);
        assert_eq!(
            blueprint.modules[3].assessment,
            "Analysis and presentation of a real case"
        );
    }
}

// =============================================================================
// Activities and assessments
// =============================================================================

mod activity_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_problem_strategy_solve_course() {
        let mut answers = full_answers("solve");
        answers.set("teaching_strategy", AnswerValue::single("problem"));
        let blueprint = compile(&answers);

        assert_eq!(
            blueprint.modules[1].activities,
            activities_for_strategy("problem", Phase::Knowledge)
        );
        assert_eq!(
            blueprint.modules[2].activities,
            activities_for_strategy("problem", Phase::Application)
        );
        assert_eq!(blueprint.modules[0].activities.len(), 3);
        assert_eq!(blueprint.modules[3].activities.len(), 4);
        assert_eq!(blueprint.modules[4].activities.len(), 4);
    }

    #[test]
    fn test_unknown_strategy_uses_scenario_activities() {
        let mut answers = full_answers("apply");
        answers.set("teaching_strategy", AnswerValue::single("gamification"));
        let fallback = compile(&answers);
        let scenario = compile(&full_answers("apply"));

        assert_eq!(fallback.modules[1].activities, scenario.modules[1].activities);
        assert_eq!(fallback.modules[2].activities, scenario.modules[2].activities);
        assert_eq!(fallback.teaching_strategy, "gamification");
    }

    #[test]
    fn test_assessments_follow_selected_methods() {
        let blueprint = compile(&full_answers("solve"));
        let assessments: Vec<&str> =
            blueprint.modules.iter().map(|m| m.assessment.as_str()).collect();
        assert_eq!(
            assessments,
            vec![
                "Initial check-in: competency self-assessment",
                "Knowledge check quiz",
                "Scenario simulation with feedback",
                "Evaluation of the quality of the proposed solutions",
                "Individual action plan with SMART goals",
            ]
        );
    }
}

// =============================================================================
// Determinism and export
// =============================================================================

mod export_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_compilation_is_deterministic() {
        let answers = full_answers("solve");
        assert_eq!(compile(&answers), compile(&answers));
    }

    #[test]
    fn test_json_round_trip() {
        let blueprint = compile(&full_answers("apply"));
        let json = blueprint.to_json_pretty().unwrap();
        assert_eq!(Blueprint::from_json_str(&json).unwrap(), blueprint);
    }

    #[test]
    fn test_export_uses_camel_case_keys() {
        let blueprint = compile(&full_answers("know"));
        let value: serde_json::Value =
            serde_json::from_str(&blueprint.to_json_pretty().unwrap()).unwrap();
        assert!(value.get("shortTermKPI").is_some());
        assert!(value.get("longTermKPI").is_some());
        assert!(value.get("transferObjective").is_some());
        assert!(value.get("uploadedDocuments").is_none());
    }

    #[test]
    fn test_export_file_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("course-blueprint.json");
        let blueprint = compile(&full_answers("solve"));
        blueprint.write_json(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            sophia::schema::validate_detected(&content).unwrap(),
            sophia::schema::SchemaKind::Blueprint
        );
        assert_eq!(Blueprint::from_json(&path).unwrap(), blueprint);
    }
}
