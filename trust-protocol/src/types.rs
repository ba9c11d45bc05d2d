//! Core types for trust validation.
//!
//! A [`ValidationRequest`] bundles the signals an entity offers as evidence.
//! The evaluator turns it into a [`TrustCertificate`] carrying one
//! [`DomainResult`] per [`ValidationDomain`].
//!
//! With the `typescript` feature enabled, these types can be exported to TypeScript
//! using ts-rs for consistency with the web frontend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Where a signal came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum SignalSource {
    /// Academic / research output
    Academic,
    /// Open source contributions
    OpenSource,
    /// Professional profile
    Professional,
    /// Community forums and groups
    Community,
    /// Creative portfolio
    Creative,
    /// Direct vouching by a trusted party
    Vouching,
}

impl SignalSource {
    /// All sources in declaration order.
    pub fn all() -> [Self; 6] {
        [
            Self::Academic,
            Self::OpenSource,
            Self::Professional,
            Self::Community,
            Self::Creative,
            Self::Vouching,
        ]
    }

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Academic => "academic",
            Self::OpenSource => "open_source",
            Self::Professional => "professional",
            Self::Community => "community",
            Self::Creative => "creative",
            Self::Vouching => "vouching",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Academic => "Academic / Research",
            Self::OpenSource => "Open Source / GitHub",
            Self::Professional => "Professional / LinkedIn",
            Self::Community => "Community / Forums",
            Self::Creative => "Creative Portfolio",
            Self::Vouching => "Direct Vouching",
        }
    }

    /// Sources that count as evidence of interiority.
    pub fn expresses_interiority(&self) -> bool {
        matches!(self, Self::Creative | Self::Community)
    }
}

/// Outcome of independent verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    /// Not yet verified
    #[default]
    Unverified,
    /// Independently confirmed
    Verified,
    /// Verification attempted and failed
    Failed,
}

/// A single piece of evidence supporting a trust domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct Signal {
    /// Unique identifier
    #[serde(default = "new_signal_id")]
    pub id: String,
    /// Where the signal came from
    pub source: SignalSource,
    /// Kind of signal (e.g. "self-reported")
    #[serde(default = "default_signal_type")]
    pub signal_type: String,
    /// The evidence itself (URL, handle, statement)
    pub content: String,
    /// Whether the requester claims it can be independently checked
    #[serde(default)]
    pub verifiable: bool,
    /// Confidence (0.0 - 1.0)
    pub confidence: f64,
    /// Verification outcome
    #[serde(default)]
    pub verification_status: VerificationStatus,
    /// Reason attached by the verifier
    #[serde(default)]
    pub verification_note: Option<String>,
    /// When the signal was recorded
    #[serde(default = "chrono::Utc::now")]
    pub timestamp: DateTime<Utc>,
}

fn default_signal_type() -> String {
    "self-reported".to_string()
}

fn new_signal_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl Signal {
    /// Create a new unverified, self-reported signal.
    pub fn new(source: SignalSource, content: impl Into<String>, confidence: f64) -> Self {
        Self {
            id: new_signal_id(),
            source,
            signal_type: default_signal_type(),
            content: content.into(),
            verifiable: false,
            confidence,
            verification_status: VerificationStatus::Unverified,
            verification_note: None,
            timestamp: Utc::now(),
        }
    }

    /// Mark as independently checkable.
    pub fn verifiable(mut self) -> Self {
        self.verifiable = true;
        self
    }

    /// Set verification status.
    pub fn with_status(mut self, status: VerificationStatus) -> Self {
        self.verification_status = status;
        self
    }

    pub fn is_verified(&self) -> bool {
        self.verification_status == VerificationStatus::Verified
    }

    pub fn is_failed(&self) -> bool {
        self.verification_status == VerificationStatus::Failed
    }
}

/// Trust assessment domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum ValidationDomain {
    /// They are who they claim to be
    Identity,
    /// What they actually want
    Intent,
    /// What their track record shows
    History,
    /// Whether their values align with stewardship
    Alignment,
    /// Whether they can use what is offered
    Capacity,
    /// What trusted others say
    Reputation,
    /// Evidence of a human interior life
    Humanity,
}

impl ValidationDomain {
    /// All domains in evaluation order.
    pub fn all() -> [Self; 7] {
        [
            Self::Identity,
            Self::Intent,
            Self::History,
            Self::Alignment,
            Self::Capacity,
            Self::Reputation,
            Self::Humanity,
        ]
    }

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Intent => "intent",
            Self::History => "history",
            Self::Alignment => "alignment",
            Self::Capacity => "capacity",
            Self::Reputation => "reputation",
            Self::Humanity => "humanity",
        }
    }
}

/// Trust level granted by a certificate.
///
/// Ordered from least to most trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum TrustLevel {
    /// Nothing submitted yet
    #[default]
    Unvetted = 0,
    /// Consent given, little evidence
    Consented = 1,
    /// Some evidence
    Partial = 2,
    /// Substantial evidence
    Substantial = 3,
    /// Strong, verified evidence
    Verified = 4,
    /// Verified and vouched for by a trusted party
    Vouched = 5,
}

impl TrustLevel {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unvetted => "unvetted",
            Self::Consented => "consented",
            Self::Partial => "partial",
            Self::Substantial => "substantial",
            Self::Verified => "verified",
            Self::Vouched => "vouched",
        }
    }
}

/// A request to validate an entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct ValidationRequest {
    /// Unique identifier
    #[serde(default = "new_request_id")]
    pub id: String,
    /// Name of the entity being validated
    pub entity_name: String,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// What the entity wants
    #[serde(default)]
    pub intent: String,
    /// Consent to be evaluated
    #[serde(default)]
    pub consent_given: bool,
    /// Acknowledgement of protective boundaries
    #[serde(default)]
    pub boundaries_acknowledged: bool,
    /// Evidence, in submission order
    #[serde(default)]
    pub signals: Vec<Signal>,
}

fn new_request_id() -> String {
    format!("REQ-{}", Utc::now().timestamp_millis())
}

impl ValidationRequest {
    /// Create a new request without consent or signals.
    pub fn new(entity_name: impl Into<String>) -> Self {
        Self {
            id: new_request_id(),
            entity_name: entity_name.into(),
            description: String::new(),
            intent: String::new(),
            consent_given: false,
            boundaries_acknowledged: false,
            signals: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_intent(mut self, intent: impl Into<String>) -> Self {
        self.intent = intent.into();
        self
    }

    /// Give consent and acknowledge boundaries.
    pub fn with_consent(mut self) -> Self {
        self.consent_given = true;
        self.boundaries_acknowledged = true;
        self
    }

    /// Add a signal.
    pub fn with_signal(mut self, signal: Signal) -> Self {
        self.signals.push(signal);
        self
    }

    /// Check the preconditions for evaluation.
    pub fn validate(&self) -> Result<()> {
        if self.entity_name.trim().is_empty() {
            return Err(TrustError::InvalidRequest("entity name is required".to_string()));
        }
        if !self.consent_given {
            return Err(TrustError::InvalidRequest("consent has not been given".to_string()));
        }
        if !self.boundaries_acknowledged {
            return Err(TrustError::InvalidRequest(
                "boundaries have not been acknowledged".to_string(),
            ));
        }
        if let Some(signal) = self
            .signals
            .iter()
            .find(|s| !(0.0..=1.0).contains(&s.confidence))
        {
            return Err(TrustError::InvalidRequest(format!(
                "signal {} has confidence {} outside [0, 1]",
                signal.id, signal.confidence
            )));
        }
        Ok(())
    }
}

/// Score for a single domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct DomainResult {
    /// Domain score (0.0 - 1.0)
    pub score: f64,
    /// How much evidence backs the score (0.0 - 1.0)
    pub confidence: f64,
    /// Number of signals that mapped to the domain
    pub signals_used: usize,
    /// Human-readable concerns
    pub concerns: Vec<String>,
}

/// Certificate issued for a validation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct TrustCertificate {
    /// Certificate ID (`CERT-XXXXXXXXX`)
    pub id: String,
    /// ID of the validated request
    pub entity_id: String,
    /// Granted level
    pub trust_level: TrustLevel,
    /// Per-domain breakdown
    pub domain_results: BTreeMap<ValidationDomain, DomainResult>,
    /// Weighted overall score (0.0 - 1.0)
    pub overall_score: f64,
    /// Protective guidance for the other party
    pub protective_recommendations: Vec<String>,
    /// When the certificate was issued
    pub issued_at: DateTime<Utc>,
    /// When the certificate lapses
    pub expires_at: DateTime<Utc>,
}

impl TrustCertificate {
    /// Result for one domain.
    pub fn domain(&self, domain: ValidationDomain) -> Option<&DomainResult> {
        self.domain_results.get(&domain)
    }

    /// Validity period in whole days.
    pub fn validity_days(&self) -> i64 {
        (self.expires_at - self.issued_at).num_days()
    }

    /// Check whether the certificate has lapsed at `at`.
    pub fn is_expired_at(&self, at: DateTime<Utc>) -> bool {
        at >= self.expires_at
    }
}

/// Error types for trust validation.
#[derive(Debug, thiserror::Error)]
pub enum TrustError {
    /// Request failed precondition checks
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, TrustError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trust_level_ordering() {
        assert!(TrustLevel::Vouched > TrustLevel::Verified);
        assert!(TrustLevel::Verified > TrustLevel::Substantial);
        assert!(TrustLevel::Consented > TrustLevel::Unvetted);
        assert_eq!(TrustLevel::default(), TrustLevel::Unvetted);
    }

    #[test]
    fn test_signal_deserializes_with_defaults() {
        let signal: Signal = serde_json::from_value(serde_json::json!({
            "id": "sig-1",
            "source": "open_source",
            "content": "github.com/example",
            "confidence": 0.6
        }))
        .unwrap();

        assert_eq!(signal.source, SignalSource::OpenSource);
        assert_eq!(signal.signal_type, "self-reported");
        assert_eq!(signal.verification_status, VerificationStatus::Unverified);
        assert!(!signal.verifiable);
    }

    #[test]
    fn test_request_validation() {
        let request = ValidationRequest::new("Ada");
        assert!(matches!(request.validate(), Err(TrustError::InvalidRequest(_))));

        let request = request.with_consent();
        assert!(request.validate().is_ok());

        let unnamed = ValidationRequest::new("  ").with_consent();
        assert!(unnamed.validate().is_err());

        let out_of_range = ValidationRequest::new("Ada")
            .with_consent()
            .with_signal(Signal::new(SignalSource::Academic, "paper", 1.5));
        assert!(out_of_range.validate().is_err());
    }

    #[test]
    fn test_source_labels() {
        assert_eq!(SignalSource::OpenSource.label(), "Open Source / GitHub");
        assert_eq!(SignalSource::Vouching.label(), "Direct Vouching");

        let labels: std::collections::HashSet<_> =
            SignalSource::all().iter().map(|s| s.label()).collect();
        assert_eq!(labels.len(), 6);
    }

    #[test]
    fn test_only_creative_and_community_express_interiority() {
        let interior: Vec<_> = SignalSource::all()
            .into_iter()
            .filter(|s| s.expresses_interiority())
            .collect();
        assert_eq!(interior, vec![SignalSource::Community, SignalSource::Creative]);
    }
}
