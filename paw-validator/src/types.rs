//! Core types for connection analysis.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Kind of connection being proposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum ConnectionType {
    /// Request for information
    Information,
    /// Introduction to someone else
    Introduction,
    /// Publishing the work
    Publication,
    /// Working together
    Collaboration,
    /// Buying or selling
    Commerce,
    /// Putting the person in front of an audience
    Exposure,
}

impl ConnectionType {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Information => "information",
            Self::Introduction => "introduction",
            Self::Publication => "publication",
            Self::Collaboration => "collaboration",
            Self::Commerce => "commerce",
            Self::Exposure => "exposure",
        }
    }
}

/// Safety verdict for a proposed connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum ThreatLevel {
    Safe,
    Caution,
    Warning,
    Danger,
    /// Not yet analyzed
    #[default]
    Unknown,
}

impl ThreatLevel {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Caution => "caution",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Unknown => "unknown",
        }
    }

    /// Recommendation text shown with a report.
    pub fn recommendation(&self) -> &'static str {
        match self {
            Self::Danger => "REJECT",
            Self::Safe => "PROCEED",
            Self::Caution | Self::Warning | Self::Unknown => "PROCEED WITH CAUTION",
        }
    }
}

/// A proposed connection to evaluate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct ConnectionProposal {
    /// Unique identifier
    #[serde(default = "new_proposal_id")]
    pub id: String,
    /// Connection type
    #[serde(rename = "type")]
    pub connection_type: ConnectionType,
    /// Who or what is reaching out
    pub target: String,
    /// What they are asking for
    pub content: String,
    /// Surrounding context
    #[serde(default)]
    pub context: String,
    /// When the proposal was made
    #[serde(default = "chrono::Utc::now")]
    pub proposed_at: DateTime<Utc>,
}

fn new_proposal_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl ConnectionProposal {
    /// Create a new proposal.
    pub fn new(
        connection_type: ConnectionType,
        target: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: new_proposal_id(),
            connection_type,
            target: target.into(),
            content: content.into(),
            context: String::new(),
            proposed_at: Utc::now(),
        }
    }

    /// Set context.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    /// Check the preconditions for analysis.
    pub fn validate(&self) -> Result<()> {
        if self.target.trim().is_empty() {
            return Err(PawError::InvalidProposal("target is required".to_string()));
        }
        if self.content.trim().is_empty() {
            return Err(PawError::InvalidProposal("content is required".to_string()));
        }
        Ok(())
    }

    /// Lowercased text scanned for keywords.
    pub fn scan_text(&self) -> String {
        format!("{} {} {}", self.target, self.content, self.context).to_lowercase()
    }
}

/// Outcome of one criterion check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct ValidationResult {
    /// Criterion name
    pub criterion: String,
    /// Whether it passed
    pub passed: bool,
    /// Confidence in the outcome (0.0 - 1.0)
    pub confidence: f64,
    /// What was found
    pub evidence: String,
    /// Concerns raised
    pub concerns: Vec<String>,
}

/// Report for an analyzed proposal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct ConnectionReport {
    /// Proposal that was analyzed
    pub proposal_id: String,
    /// Verdict
    pub threat_level: ThreatLevel,
    /// Fraction of criteria passed (0.0 - 1.0)
    pub overall_score: f64,
    /// Per-criterion results, in evaluation order
    pub results: Vec<ValidationResult>,
    /// REJECT / PROCEED / PROCEED WITH CAUTION
    pub recommendation: String,
    /// Measures to protect the recipient
    pub protective_measures: Vec<String>,
    /// Red-flag keywords found
    pub red_flags: Vec<String>,
    /// Green-flag keywords found
    pub green_flags: Vec<String>,
    /// When the analysis ran
    pub validated_at: DateTime<Utc>,
}

impl ConnectionReport {
    /// Result for a criterion by name.
    pub fn result(&self, criterion: &str) -> Option<&ValidationResult> {
        self.results.iter().find(|r| r.criterion == criterion)
    }
}

/// Error types for connection analysis.
#[derive(Debug, thiserror::Error)]
pub enum PawError {
    /// Proposal failed precondition checks
    #[error("Invalid proposal: {0}")]
    InvalidProposal(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, PawError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendation_text() {
        assert_eq!(ThreatLevel::Danger.recommendation(), "REJECT");
        assert_eq!(ThreatLevel::Safe.recommendation(), "PROCEED");
        assert_eq!(ThreatLevel::Warning.recommendation(), "PROCEED WITH CAUTION");
        assert_eq!(ThreatLevel::Caution.recommendation(), "PROCEED WITH CAUTION");
    }

    #[test]
    fn test_proposal_json_uses_type_field() {
        let proposal: ConnectionProposal = serde_json::from_value(serde_json::json!({
            "id": "prop-1",
            "type": "exposure",
            "target": "Podcast",
            "content": "Come on the show"
        }))
        .unwrap();

        assert_eq!(proposal.connection_type, ConnectionType::Exposure);
        assert!(proposal.context.is_empty());
    }

    #[test]
    fn test_proposal_validation() {
        let ok = ConnectionProposal::new(ConnectionType::Information, "Lab", "Question about data");
        assert!(ok.validate().is_ok());

        let no_target = ConnectionProposal::new(ConnectionType::Information, " ", "Question");
        assert!(matches!(no_target.validate(), Err(PawError::InvalidProposal(_))));

        let no_content = ConnectionProposal::new(ConnectionType::Information, "Lab", "");
        assert!(no_content.validate().is_err());
    }

    #[test]
    fn test_scan_text_is_lowercase() {
        let proposal = ConnectionProposal::new(ConnectionType::Commerce, "ACME", "Monetize IT")
            .with_context("Growth Hack");
        assert_eq!(proposal.scan_text(), "acme monetize it growth hack");
    }
}
