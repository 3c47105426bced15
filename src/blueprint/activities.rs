//! @acp:module "Activity Table"
//! @acp:summary "Strategy x phase lookup of instructional activities"
//! @acp:domain blueprint
//! @acp:layer data

use serde::{Deserialize, Serialize};

/// Strategy used when the selected one has no table entry
pub const FALLBACK_STRATEGY: &str = "scenario";

/// Which half of the learning the activities serve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Knowledge,
    Application,
}

type Cell = [&'static str; 3];

/// (strategy, knowledge activities, application activities)
const ACTIVITY_TABLE: &[(&str, Cell, Cell)] = &[
    (
        "microlearning",
        [
            "Video nugget (5-7 min) on the key concept",
            "Summary infographic",
            "Consolidation mini-quiz",
        ],
        [
            "Applied micro-exercise (10 min)",
            "Interactive flashcards for review",
            "Timed practical challenge",
        ],
    ),
    (
        "scenario",
        [
            "Presentation of the framework through a real scenario",
            "Guided analysis of an example case",
            "Discussion: \"What would you have done?\"",
        ],
        [
            "Role-play on a real company scenario",
            "Simulation with structured feedback",
            "Debriefing and identification of best practices",
        ],
    ),
    (
        "problem",
        [
            "Presentation of a real problem as the starting point",
            "Guided research of the information needed",
            "Collaborative construction of the solution framework",
        ],
        [
            "Team work on a real company problem",
            "Prototyping of the solution",
            "Presentation and peer review of the solutions",
        ],
    ),
    (
        "blended",
        [
            "Asynchronous e-learning module (pre-work)",
            "Live discussion of the key concepts",
            "Q&A and clarifications in the live session",
        ],
        [
            "Guided exercise in a live session",
            "Individual practical activity (asynchronous)",
            "Follow-up session sharing the results",
        ],
    ),
    (
        "flipped",
        [
            "Pre-class study material (videos, readings, podcasts)",
            "Pre-session check quiz",
            "In-class discussion of the questions that emerged",
        ],
        [
            "Hands-on workshop in class",
            "Hands-on exercise with facilitator support",
            "Immediate feedback and on-the-spot coaching",
        ],
    ),
];

fn lookup(strategy: &str, phase: Phase) -> Option<&'static Cell> {
    ACTIVITY_TABLE
        .iter()
        .find(|(name, _, _)| *name == strategy)
        .map(|(_, knowledge, application)| match phase {
            Phase::Knowledge => knowledge,
            Phase::Application => application,
        })
}

/// Activities for a strategy and phase, falling back to the scenario
/// strategy when the strategy is unknown or absent
pub fn activities_for_strategy(strategy: &str, phase: Phase) -> Vec<String> {
    let cell = lookup(strategy, phase).or_else(|| {
        if !strategy.is_empty() {
            tracing::warn!(
                "Unknown teaching strategy '{}', using '{}' activities",
                strategy,
                FALLBACK_STRATEGY
            );
        }
        lookup(FALLBACK_STRATEGY, phase)
    });

    cell.map(|c| c.iter().map(|s| s.to_string()).collect())
        .unwrap_or_default()
}

/// Strategies that have a table entry
pub fn known_strategies() -> impl Iterator<Item = &'static str> {
    ACTIVITY_TABLE.iter().map(|(name, _, _)| *name)
}
