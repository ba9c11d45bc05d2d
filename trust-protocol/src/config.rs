//! Configuration tables for trust evaluation.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use crate::types::{Result, SignalSource, TrustError, ValidationDomain};

/// Configuration for the trust evaluator and signal verifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrustConfig {
    /// Domain criteria with weights
    pub domains: Vec<DomainCriterion>,
    /// Which domains each signal source provides evidence for
    pub source_domains: BTreeMap<SignalSource, Vec<ValidationDomain>>,
    /// Domain scoring parameters
    pub scoring: ScoringConfig,
    /// Trust level thresholds
    pub thresholds: TrustThresholds,
    /// Certificate validity
    pub validity: ValidityConfig,
    /// Mock verifier behavior
    pub verifier: VerifierConfig,
}

impl Default for TrustConfig {
    fn default() -> Self {
        use SignalSource::*;
        use ValidationDomain::*;

        let source_domains = BTreeMap::from([
            (Academic, vec![Identity, History, Capacity, Humanity]),
            (OpenSource, vec![Identity, History, Alignment]),
            (Professional, vec![Identity, History]),
            (Community, vec![Intent, Alignment, Capacity, Humanity]),
            (Creative, vec![Alignment, Capacity, Humanity]),
            (Vouching, vec![Reputation, Intent, Humanity]),
        ]);

        Self {
            domains: vec![
                DomainCriterion::new(
                    Identity,
                    "Identity Verification",
                    0.15,
                    "Establishing they are who they claim to be",
                ),
                DomainCriterion::new(
                    Intent,
                    "Intent Assessment",
                    0.20,
                    "Understanding what they actually want",
                ),
                DomainCriterion::new(
                    History,
                    "History Analysis",
                    0.15,
                    "What their track record shows",
                ),
                DomainCriterion::new(
                    Alignment,
                    "Value Alignment",
                    0.10,
                    "Do values align with stewardship?",
                ),
                DomainCriterion::new(
                    Capacity,
                    "Capacity to Receive",
                    0.10,
                    "Can they use what is offered?",
                ),
                DomainCriterion::new(
                    Reputation,
                    "Reputation Assessment",
                    0.10,
                    "What do trusted others say?",
                ),
                DomainCriterion::new(
                    Humanity,
                    "Humanity & Interiority",
                    0.20,
                    "Statistical match to human behavioral clusters (shadow-signature).",
                ),
            ],
            source_domains,
            scoring: ScoringConfig::default(),
            thresholds: TrustThresholds::default(),
            validity: ValidityConfig::default(),
            verifier: VerifierConfig::default(),
        }
    }
}

impl TrustConfig {
    /// Load config from YAML.
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> std::result::Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Weight of a domain. Domains missing from the table weigh nothing.
    pub fn weight(&self, domain: ValidationDomain) -> f64 {
        self.criterion(domain).map(|c| c.weight).unwrap_or(0.0)
    }

    /// Criterion for a domain.
    pub fn criterion(&self, domain: ValidationDomain) -> Option<&DomainCriterion> {
        self.domains.iter().find(|c| c.domain == domain)
    }

    /// Sum of all domain weights.
    pub fn total_weight(&self) -> f64 {
        ValidationDomain::all().iter().map(|d| self.weight(*d)).sum()
    }

    /// Domains a source provides evidence for.
    pub fn domains_for(&self, source: SignalSource) -> &[ValidationDomain] {
        self.source_domains
            .get(&source)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Check that the tables are usable.
    pub fn validate(&self) -> Result<()> {
        for domain in ValidationDomain::all() {
            if self.criterion(domain).is_none() {
                return Err(TrustError::ConfigError(format!(
                    "missing criterion for domain '{}'",
                    domain.as_str()
                )));
            }
        }

        let mut seen = BTreeSet::new();
        for criterion in &self.domains {
            if !seen.insert(criterion.domain) {
                return Err(TrustError::ConfigError(format!(
                    "duplicate criterion for domain '{}'",
                    criterion.domain.as_str()
                )));
            }
            if !(0.0..=1.0).contains(&criterion.weight) {
                return Err(TrustError::ConfigError(format!(
                    "weight for '{}' must be within [0, 1], got {}",
                    criterion.domain.as_str(),
                    criterion.weight
                )));
            }
        }

        if self.total_weight() <= 0.0 {
            return Err(TrustError::ConfigError(
                "total domain weight must be positive".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.verifier.failure_rate) {
            return Err(TrustError::ConfigError(format!(
                "verifier failure rate must be within [0, 1], got {}",
                self.verifier.failure_rate
            )));
        }

        Ok(())
    }
}

/// A weighted trust domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainCriterion {
    /// Domain
    pub domain: ValidationDomain,
    /// Display name
    pub name: String,
    /// Relative weight (0.0 - 1.0)
    pub weight: f64,
    /// What the domain establishes
    pub description: String,
}

impl DomainCriterion {
    pub fn new(
        domain: ValidationDomain,
        name: impl Into<String>,
        weight: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            domain,
            name: name.into(),
            weight,
            description: description.into(),
        }
    }
}

/// Domain scoring parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Score bonus per verified signal
    pub verified_bonus: f64,
    /// Maximum total verified bonus
    pub verified_bonus_cap: f64,
    /// Domain confidence gained per matched signal
    pub confidence_per_signal: f64,
    /// Scores below this raise an insufficient-evidence concern
    pub insufficient_evidence_below: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            verified_bonus: 0.20,
            verified_bonus_cap: 0.5,
            confidence_per_signal: 0.2,
            insufficient_evidence_below: 0.5,
        }
    }
}

/// Minimum overall scores for each trust level.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrustThresholds {
    pub vouched: f64,
    /// A verified vouching signal must exceed this confidence for `Vouched`
    pub vouching_confidence: f64,
    pub verified: f64,
    pub substantial: f64,
    pub partial: f64,
}

impl Default for TrustThresholds {
    fn default() -> Self {
        Self {
            vouched: 0.90,
            vouching_confidence: 0.8,
            verified: 0.85,
            substantial: 0.70,
            partial: 0.50,
        }
    }
}

/// Certificate validity periods.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidityConfig {
    /// Validity for `Verified` certificates (days)
    pub extended_days: i64,
    /// Validity for every other level (days)
    pub standard_days: i64,
}

impl Default for ValidityConfig {
    fn default() -> Self {
        Self {
            extended_days: 180,
            standard_days: 30,
        }
    }
}

/// Mock verifier configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Simulated latency (ms)
    pub delay_ms: u64,
    /// Probability of a simulated endpoint failure (0.0 - 1.0)
    pub failure_rate: f64,
    /// Content shorter than this (chars) always fails
    pub min_content_len: usize,
    /// Confidence assigned on failure
    pub failure_confidence: f64,
    /// Confidence added on success
    pub success_boost: f64,
}

impl VerifierConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            delay_ms: 1500,
            failure_rate: 0.10,
            min_content_len: 5,
            failure_confidence: 0.1,
            success_boost: 0.3,
        }
    }
}
