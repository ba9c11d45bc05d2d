//! Core types for interview sessions and profile signatures.
//!
//! With the `typescript` feature enabled, these types can be exported to TypeScript
//! using ts-rs for consistency with the web frontend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Personality signature axis a question probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum SignatureDimension {
    /// Core unsatisfied need
    Hunger,
    /// Natural gift
    Gift,
    /// How they move through hard problems
    Movement,
    /// Where they come alive
    Environment,
    /// Problems that feel made for them
    Affinity,
    /// What they are growing into
    Edge,
    /// Hardship that has been integrated
    Wound,
    /// What they want for the world
    Vision,
}

impl SignatureDimension {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hunger => "hunger",
            Self::Gift => "gift",
            Self::Movement => "movement",
            Self::Environment => "environment",
            Self::Affinity => "affinity",
            Self::Edge => "edge",
            Self::Wound => "wound",
            Self::Vision => "vision",
        }
    }

    /// All dimensions in interview order.
    pub fn all() -> [Self; 8] {
        [
            Self::Hunger,
            Self::Gift,
            Self::Movement,
            Self::Environment,
            Self::Affinity,
            Self::Edge,
            Self::Wound,
            Self::Vision,
        ]
    }
}

/// A substring that, when present in an answer, prompts a follow-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct FollowUpTrigger {
    /// Substring searched for in the lowercased answer
    pub trigger: String,
    /// Follow-up shown to the subject
    pub follow_up: String,
}

impl FollowUpTrigger {
    pub fn new(trigger: impl Into<String>, follow_up: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into(),
            follow_up: follow_up.into(),
        }
    }
}

/// A question in the interview bank.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct InterviewQuestion {
    /// Unique identifier
    pub id: String,
    /// Question text
    pub text: String,
    /// Dimension the answer feeds
    pub dimension: SignatureDimension,
    /// What the answer reveals
    pub what_it_reveals: String,
    /// Follow-up triggers, checked in order
    #[serde(default)]
    pub follow_up_triggers: Vec<FollowUpTrigger>,
}

impl InterviewQuestion {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        dimension: SignatureDimension,
        what_it_reveals: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            dimension,
            what_it_reveals: what_it_reveals.into(),
            follow_up_triggers: Vec::new(),
        }
    }

    /// Add a follow-up trigger.
    pub fn with_trigger(mut self, trigger: impl Into<String>, follow_up: impl Into<String>) -> Self {
        self.follow_up_triggers.push(FollowUpTrigger::new(trigger, follow_up));
        self
    }

    /// First follow-up whose trigger appears in the answer.
    pub fn follow_up_for(&self, answer: &str) -> Option<&str> {
        let answer = answer.to_lowercase();
        self.follow_up_triggers
            .iter()
            .find(|t| answer.contains(t.trigger.to_lowercase().as_str()))
            .map(|t| t.follow_up.as_str())
    }
}

/// A recorded answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct InterviewResponse {
    /// Question answered
    pub question_id: String,
    /// Answer text as given
    pub response: String,
    /// When the answer was recorded
    pub recorded_at: DateTime<Utc>,
}

/// Session status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    InProgress,
    Completed,
}

/// An interview in progress or completed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct InterviewSession {
    /// Session ID (`SESS-<unix millis>`)
    pub id: String,
    /// Person being interviewed
    pub subject_name: String,
    /// Questions, in asking order
    pub questions: Vec<InterviewQuestion>,
    /// Answers so far
    pub responses: Vec<InterviewResponse>,
    /// Index of the next question to ask
    pub current_question_index: usize,
    /// Session status
    pub status: SessionStatus,
    /// Follow-up prompted by the latest answer
    pub last_follow_up: Option<String>,
    /// Signature, once issued
    pub signature: Option<ProfileSignature>,
}

impl InterviewSession {
    /// Question awaiting an answer, if any.
    pub fn current_question(&self) -> Option<&InterviewQuestion> {
        match self.status {
            SessionStatus::InProgress => self.questions.get(self.current_question_index),
            SessionStatus::Completed => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == SessionStatus::Completed
    }

    /// Fraction of questions answered (0.0 - 1.0).
    pub fn progress(&self) -> f64 {
        if self.questions.is_empty() {
            return 1.0;
        }
        self.current_question_index as f64 / self.questions.len() as f64
    }

    /// Lowercased answers to questions of a dimension, joined by spaces.
    pub fn text_for(&self, dimension: SignatureDimension) -> String {
        self.responses
            .iter()
            .filter(|r| {
                self.questions
                    .iter()
                    .any(|q| q.id == r.question_id && q.dimension == dimension)
            })
            .map(|r| r.response.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Profile derived from a completed interview.
///
/// `id` and `hash` are random display identifiers, not content digests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct ProfileSignature {
    /// Signature ID (`SIG-XXXXXXXXX`)
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub hungers: Vec<String>,
    pub gifts: Vec<String>,
    pub movement_pattern: String,
    pub activation_environment: String,
    pub affinities: Vec<String>,
    pub growing_edge: String,
    pub integrated_wounds: Vec<String>,
    pub vision: String,
    /// Who this person would benefit from
    pub would_benefit_from: Vec<String>,
    /// Who this person could benefit
    pub could_benefit: Vec<String>,
    /// Environments that drain this person
    pub anti_patterns: Vec<String>,
    /// Display hash (8 uppercase hex chars)
    pub hash: String,
}

/// Error types for interviews.
#[derive(Debug, thiserror::Error)]
pub enum InterviewError {
    /// Blank answer submitted
    #[error("Answer must not be empty")]
    EmptyAnswer,

    /// No question is pending
    #[error("Session {0} is already completed")]
    SessionCompleted(String),

    /// Signature requested before the last answer
    #[error("Session {0} is not completed")]
    NotCompleted(String),

    /// Signature already attached
    #[error("Session {0} already has a signature")]
    SignatureAlreadyIssued(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, InterviewError>;
