//! @acp:module "Built-in Questionnaire"
//! @acp:summary "Question data for the three backward-design stages"
//! @acp:domain wizard
//! @acp:layer data

use super::{Activation, Question, QuestionOption, QuestionType, Stage, StageInfo};
use crate::uploads::ACCEPTED_EXTENSIONS;

const STAGE_ONE_TITLE: &str = "Identify Desired Results";
const STAGE_TWO_TITLE: &str = "Determine Acceptable Evidence";
const STAGE_THREE_TITLE: &str = "Plan and Personalize the Experience";

fn stage_title(stage: Stage) -> &'static str {
    match stage {
        Stage::One => STAGE_ONE_TITLE,
        Stage::Two => STAGE_TWO_TITLE,
        Stage::Three => STAGE_THREE_TITLE,
    }
}

fn question(
    id: &str,
    stage: Stage,
    question_type: QuestionType,
    text: &str,
    explanation: &str,
    required: bool,
) -> Question {
    Question {
        id: id.to_string(),
        stage,
        stage_title: stage_title(stage).to_string(),
        text: text.to_string(),
        explanation: explanation.to_string(),
        question_type,
        options: Vec::new(),
        placeholder: None,
        required,
        accepted_file_types: None,
        activation: Activation::Always,
    }
}

fn opt(value: &str, label: &str, description: &str) -> QuestionOption {
    QuestionOption {
        value: value.to_string(),
        label: label.to_string(),
        description: Some(description.to_string()),
    }
}

trait QuestionExt {
    fn placeholder(self, text: &str) -> Self;
    fn options(self, options: Vec<QuestionOption>) -> Self;
    fn uploads(self) -> Self;
    fn active_when(self, question: &str, value: &str) -> Self;
}

impl QuestionExt for Question {
    fn placeholder(mut self, text: &str) -> Self {
        self.placeholder = Some(text.to_string());
        self
    }

    fn options(mut self, options: Vec<QuestionOption>) -> Self {
        self.options = options;
        self
    }

    fn uploads(mut self) -> Self {
        self.accepted_file_types = Some(ACCEPTED_EXTENSIONS.to_string());
        self
    }

    fn active_when(mut self, question: &str, value: &str) -> Self {
        self.activation = Activation::WhenAnswerEquals {
            question: question.to_string(),
            value: value.to_string(),
        };
        self
    }
}

pub(super) fn questions() -> Vec<Question> {
    use QuestionType::*;

    vec![
        // Stage 1: desired results
        question(
            "transfer_objective",
            Stage::One,
            Textarea,
            "What single action or decision must participants be able to take on their own three months after the course ends?",
            "Backward design starts from the end: the observable behaviour that proves the course worked. This is your transfer objective, the Big Idea of the course.",
            true,
        )
        .placeholder("e.g. \"Managers run a structured feedback conversation with their team without HR support\""),
        question(
            "business_objective",
            Stage::One,
            Textarea,
            "Which specific business result must this course influence or unlock?",
            "Tying the course to a measurable business objective keeps training strategic for the organization instead of an end in itself.",
            true,
        )
        .placeholder("e.g. \"Reduce turnover in production departments by 15% within 12 months\""),
        question(
            "depth_level",
            Stage::One,
            SingleChoice,
            "What level of cognitive depth is required of participants?",
            "Using Bloom's Taxonomy we calibrate how deep the course goes. This decides whether it is informative, applied or transformative.",
            true,
        )
        .options(vec![
            opt("know", "Know", "Participants must understand fundamental concepts and notions"),
            opt("apply", "Apply", "Participants must use tools and procedures in standard contexts"),
            opt("solve", "Problem Solving", "Participants must analyse complex situations and make autonomous decisions"),
        ]),
        // Stage 2: evidence
        question(
            "assessment_methods",
            Stage::Two,
            MultiChoice,
            "How do you want to verify that learning happened? You can select more than one option.",
            "In backward design the assessment is designed BEFORE the content. Without knowing how success is measured you risk teaching irrelevant things.",
            true,
        )
        .options(vec![
            opt("quiz", "Quiz", "Multiple-choice or open questions to check knowledge"),
            opt("simulation", "Scenario Simulation", "Role-play or case study where participants apply skills in realistic situations"),
            opt("case", "Case Analysis", "Study and discussion of a real or realistic business case"),
        ]),
        question(
            "kpi_short",
            Stage::Two,
            Textarea,
            "Which SHORT-term metric (within 1 month) will show the course is working?",
            "A short-term metric gives you a quick reality check and a chance to correct course before it is too late.",
            true,
        )
        .placeholder("e.g. \"80% of participants pass the final quiz with a score of 75% or more\""),
        question(
            "kpi_long",
            Stage::Two,
            Textarea,
            "Which LONG-term metric (3-12 months) will confirm the real impact of the course?",
            "The long-term metric measures the true ROI of training: lasting change in behaviour or business results.",
            true,
        )
        .placeholder("e.g. \"20% fewer conflict reports in the teams involved\""),
        // Stage 3: learning experience
        question(
            "learner_profile",
            Stage::Three,
            Textarea,
            "Which roles in the company will attend the course?",
            "Knowing the learners lets you calibrate language, examples and level of abstraction.",
            true,
        )
        .placeholder("e.g. \"Production team leaders with 3-10 years of experience and no prior management training\""),
        question(
            "resistance",
            Stage::Three,
            Textarea,
            "What resistance or objections might participants have towards this course?",
            "Anticipating resistance lets you design motivational hooks and address objections in the design instead of discovering them in the classroom.",
            true,
        )
        .placeholder("e.g. \"They think it is yet another useless theoretical course\", \"They have no time\""),
        question(
            "scenarios",
            Stage::Three,
            Textarea,
            "Describe 3 real situations, dilemmas or problems participants face in their daily work.",
            "Real scenarios are the heart of scenario-based learning. They make the course immediately relevant and applicable.",
            true,
        )
        .placeholder("e.g. \"1) A team member is always late and the leader does not know how to address it. 2) ...\""),
        question(
            "excluded_content",
            Stage::Three,
            Textarea,
            "Are there related topics you want to EXCLUDE from the course entirely?",
            "Defining boundaries matters as much as defining content. It prevents scope creep and keeps the course focused.",
            false,
        )
        .placeholder("e.g. \"Do not cover labour-law aspects\""),
        question(
            "included_references",
            Stage::Three,
            TextareaWithUpload,
            "Are there company documents or policies to INCLUDE as reference material in the course knowledge base?",
            "Official documents anchor the course in your company's reality. You can describe them and/or upload the files.",
            false,
        )
        .placeholder("e.g. \"Company Code of Ethics\", \"Performance management procedure P-HR-012\"")
        .uploads(),
        question(
            "cited_references",
            Stage::Three,
            TextareaWithUpload,
            "Are there documents or policies to CITE explicitly during the training?",
            "Citing official sources strengthens the authority of the content and aligns the course with the organization's rules. You can describe them and/or upload the files.",
            false,
        )
        .placeholder("e.g. \"Collective agreement, article 42 on mandatory training\"")
        .uploads(),
        question(
            "duration",
            Stage::Three,
            SingleChoice,
            "What is the maximum desired duration of the whole course?",
            "Duration is a critical design constraint: it determines the possible depth and the module structure.",
            true,
        )
        .options(vec![
            opt("2h", "2 hours", "Single module, focus on 1 skill"),
            opt("4h", "4 hours (half day)", "2-3 modules, mix of theory and practice"),
            opt("8h", "8 hours (full day)", "Complete path with exercises"),
            opt("16h", "16 hours (2 days)", "In-depth path with simulations"),
            opt("custom", "Other", "Specify a custom duration"),
        ]),
        question(
            "duration_custom",
            Stage::Three,
            Text,
            "Specify the custom duration of the course.",
            "State the total desired duration in hours or days.",
            false,
        )
        .placeholder("e.g. \"12 hours over 3 half days\"")
        .active_when("duration", "custom"),
        question(
            "tone",
            Stage::Three,
            SingleChoice,
            "Which tone of voice should the course have?",
            "Tone drives engagement: a safety course needs a different tone from a leadership course.",
            true,
        )
        .options(vec![
            opt("formal", "Formal", "Professional, institutional, authoritative"),
            opt("motivational", "Motivational", "Energetic, inspiring, growth-oriented"),
            opt("practical", "Practical", "Direct, concrete, action-oriented"),
            opt("regulatory", "Regulatory", "Precise, procedural, rule-based"),
        ]),
        question(
            "teaching_strategy",
            Stage::Three,
            SingleChoice,
            "Which teaching strategy should dominate the course?",
            "The teaching strategy decides how learning happens. Pick the one that best fits your context and learners.",
            true,
        )
        .options(vec![
            opt("microlearning", "Microlearning", "Short learning nuggets (5-10 min), ideal for content to memorize"),
            opt("scenario", "Scenario-Based Learning", "Learning through simulations of real situations"),
            opt("problem", "Problem-Based Learning", "Participants solve real problems as the vehicle for learning"),
            opt("blended", "Blended Learning", "Mix of asynchronous e-learning and live sessions"),
            opt("flipped", "Flipped Classroom", "Theory before class plus hands-on sessions in person"),
        ]),
    ]
}

pub(super) fn stage_info(stage: Stage) -> StageInfo {
    match stage {
        Stage::One => StageInfo {
            title: "Desired Results",
            description: "Let's define the finish line: what must participants be able to do at the end of the course?",
            icon: "🎯",
        },
        Stage::Two => StageInfo {
            title: "Evidence",
            description: "How will we verify that learning really happened?",
            icon: "📋",
        },
        Stage::Three => StageInfo {
            title: "Learning Experience",
            description: "Let's design the content, calibrated to the participants and the objectives.",
            icon: "🛠",
        },
    }
}
