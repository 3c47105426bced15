//! @acp:module "Module Roles"
//! @acp:summary "Depth tiers and the five canonical module roles"
//! @acp:domain blueprint
//! @acp:layer logic

use serde::{Deserialize, Serialize};

use super::activities::Phase;

/// Cognitive depth requested for the course (Bloom-style)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepthTier {
    #[default]
    Know,
    Apply,
    Solve,
}

impl DepthTier {
    /// Map a `depth_level` answer to a tier.
    ///
    /// Anything other than `apply` or `solve` (including no answer) yields
    /// the narrowest course.
    pub fn from_answer(value: &str) -> Self {
        match value {
            "apply" => DepthTier::Apply,
            "solve" => DepthTier::Solve,
            _ => DepthTier::Know,
        }
    }

    /// Roles included at this tier, in canonical order
    pub fn roles(&self) -> Vec<ModuleRole> {
        ModuleRole::all()
            .iter()
            .copied()
            .filter(|role| role.included_at(*self))
            .collect()
    }
}

/// One of the five canonical curriculum positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModuleRole {
    Context,
    Concepts,
    Application,
    ProblemSolving,
    ActionPlan,
}

impl ModuleRole {
    pub fn all() -> &'static [ModuleRole] {
        &[
            ModuleRole::Context,
            ModuleRole::Concepts,
            ModuleRole::Application,
            ModuleRole::ProblemSolving,
            ModuleRole::ActionPlan,
        ]
    }

    /// Canonical slot, 1 through 5, independent of the final numbering
    pub fn slot(&self) -> u8 {
        match self {
            ModuleRole::Context => 1,
            ModuleRole::Concepts => 2,
            ModuleRole::Application => 3,
            ModuleRole::ProblemSolving => 4,
            ModuleRole::ActionPlan => 5,
        }
    }

    /// Share of the total course time, keyed by canonical slot.
    ///
    /// Skipped roles do not hand their share to neighbours, so the weights of
    /// a know- or apply-tier course sum to less than 1.0.
    pub fn weight(&self) -> f64 {
        match self {
            ModuleRole::Context => 0.15,
            ModuleRole::Concepts => 0.30,
            ModuleRole::Application => 0.25,
            ModuleRole::ProblemSolving => 0.20,
            ModuleRole::ActionPlan => 0.10,
        }
    }

    pub fn included_at(&self, tier: DepthTier) -> bool {
        match self {
            ModuleRole::Context | ModuleRole::Concepts | ModuleRole::ActionPlan => true,
            ModuleRole::Application => matches!(tier, DepthTier::Apply | DepthTier::Solve),
            ModuleRole::ProblemSolving => tier == DepthTier::Solve,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ModuleRole::Context => "Context & Objectives",
            ModuleRole::Concepts => "Key Concepts & Framework",
            ModuleRole::Application => "Practical Application",
            ModuleRole::ProblemSolving => "Complex Scenarios & Problem Solving",
            ModuleRole::ActionPlan => "Personal Action Plan",
        }
    }

    pub fn objective(&self) -> &'static str {
        match self {
            ModuleRole::Context => "Understand why the course exists and what is expected",
            ModuleRole::Concepts => "Acquire the fundamental knowledge needed to operate",
            ModuleRole::Application => "Apply the knowledge in guided contexts",
            ModuleRole::ProblemSolving => {
                "Analyse complex situations and make autonomous decisions"
            }
            ModuleRole::ActionPlan => "Turn the learning into concrete post-course actions",
        }
    }

    /// The activity-table phase for roles that consult the strategy
    pub fn phase(&self) -> Option<Phase> {
        match self {
            ModuleRole::Concepts => Some(Phase::Knowledge),
            ModuleRole::Application => Some(Phase::Application),
            _ => None,
        }
    }

    /// Fixed activities for roles that ignore the strategy
    pub fn fixed_activities(&self) -> &'static [&'static str] {
        match self {
            ModuleRole::Context => &[
                "Presentation of the objectives and the path (W - Where)",
                "Ice-breaker or hook activity (H - Hook)",
                "Initial self-assessment of competencies",
            ],
            ModuleRole::ProblemSolving => &[
                "Analysis of real scenarios provided by the company",
                "Small-group work on complex cases",
                "Presentation and discussion of the proposed solutions",
                "Debriefing and lessons learned",
            ],
            ModuleRole::ActionPlan => &[
                "Guided reflection on the learning (R - Rethink)",
                "Drafting of the individual action plan",
                "Sharing commitments with the group",
                "Post-assessment compared with the initial self-assessment (E - Evaluate)",
            ],
            ModuleRole::Concepts | ModuleRole::Application => &[],
        }
    }

    /// Assessment text: first match wins against this role's preferred method
    pub fn assessment(&self, selected_methods: &[String]) -> &'static str {
        let has = |method: &str| selected_methods.iter().any(|m| m == method);
        match self {
            ModuleRole::Context => "Initial check-in: competency self-assessment",
            ModuleRole::Concepts => {
                if has("quiz") {
                    "Knowledge check quiz"
                } else {
                    "Guided verification discussion"
                }
            }
            ModuleRole::Application => {
                if has("simulation") {
                    "Scenario simulation with feedback"
                } else {
                    "Practical exercise with peer evaluation"
                }
            }
            ModuleRole::ProblemSolving => {
                if has("case") {
                    "Analysis and presentation of a real case"
                } else {
                    "Evaluation of the quality of the proposed solutions"
                }
            }
            ModuleRole::ActionPlan => "Individual action plan with SMART goals",
        }
    }
}
