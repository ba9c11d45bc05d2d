//! Connection proposal analysis.
//!
//! Scans a proposal for commercial (red) and commons (green) keywords, runs
//! the fixed criteria and grades the result as a [`ThreatLevel`].

use chrono::Utc;
use tracing::{debug, info};

use crate::config::PawConfig;
use crate::types::{
    ConnectionProposal, ConnectionReport, Result, ThreatLevel, ValidationResult,
};

pub const CRITERION_INTENT: &str = "Sincere Thirst / Intent";
pub const CRITERION_ALIGNMENT: &str = "Value Alignment";
pub const CRITERION_PROTECTION: &str = "Protection / Reversibility";
pub const CRITERION_IDENTITY: &str = "Identity Protection";

/// Keywords found in a proposal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagScan {
    /// Red flags found, in table order
    pub red: Vec<String>,
    /// Green flags found, in table order
    pub green: Vec<String>,
}

/// Analyzer for connection proposals.
pub struct ConnectionAnalyzer {
    config: PawConfig,
}

impl ConnectionAnalyzer {
    /// Create an analyzer with the default keyword tables.
    pub fn new() -> Self {
        Self::with_config(PawConfig::default())
    }

    /// Create with custom configuration.
    pub fn with_config(config: PawConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PawConfig {
        &self.config
    }

    /// Validate the proposal, then analyze it.
    pub fn review(&self, proposal: &ConnectionProposal) -> Result<ConnectionReport> {
        proposal.validate()?;
        Ok(self.analyze(proposal))
    }

    /// Analyze a well-formed proposal.
    pub fn analyze(&self, proposal: &ConnectionProposal) -> ConnectionReport {
        let text = proposal.scan_text();
        let flags = self.scan(&text);

        let mut results = vec![
            check_intent(&flags),
            check_alignment(&flags),
            check_protection(),
        ];
        if let Some(result) = self.check_identity_exposure(proposal, &text) {
            results.push(result);
        }

        let passed = results.iter().filter(|r| r.passed).count();
        let overall_score = passed as f64 / results.len() as f64;
        let threat_level = self.threat_level(&flags, overall_score);

        info!(
            proposal_id = %proposal.id,
            connection_type = proposal.connection_type.as_str(),
            threat_level = threat_level.as_str(),
            red_flags = flags.red.len(),
            green_flags = flags.green.len(),
            "Analyzed connection proposal"
        );

        ConnectionReport {
            proposal_id: proposal.id.clone(),
            threat_level,
            overall_score,
            results,
            recommendation: threat_level.recommendation().to_string(),
            protective_measures: protective_measures(threat_level),
            red_flags: flags.red,
            green_flags: flags.green,
            validated_at: Utc::now(),
        }
    }

    /// Find the configured keywords contained in `text`.
    ///
    /// `text` must already be lowercase. Each keyword is reported once.
    pub fn scan(&self, text: &str) -> FlagScan {
        FlagScan {
            red: matching(&self.config.red_flags, text),
            green: matching(&self.config.green_flags, text),
        }
    }

    /// Grade the scan and pass ratio.
    pub fn threat_level(&self, flags: &FlagScan, score: f64) -> ThreatLevel {
        let t = &self.config.thresholds;

        if flags.red.len() > t.danger_red_flags {
            ThreatLevel::Danger
        } else if !flags.red.is_empty() {
            ThreatLevel::Warning
        } else if score > t.safe_score && !flags.green.is_empty() {
            ThreatLevel::Safe
        } else {
            ThreatLevel::Caution
        }
    }

    fn check_identity_exposure(
        &self,
        proposal: &ConnectionProposal,
        text: &str,
    ) -> Option<ValidationResult> {
        if !self.config.exposure_types.contains(&proposal.connection_type) {
            return None;
        }

        let term = self
            .config
            .exposure_terms
            .iter()
            .find(|term| text.contains(term.to_lowercase().as_str()))?;

        debug!(proposal_id = %proposal.id, term = %term, "Public exposure detected");

        Some(ValidationResult {
            criterion: CRITERION_IDENTITY.to_string(),
            passed: false,
            confidence: 0.9,
            evidence: "Public exposure detected".to_string(),
            concerns: vec![
                "Risk of unwanted attention".to_string(),
                "Verify audience quality first".to_string(),
            ],
        })
    }
}

impl Default for ConnectionAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn matching(keywords: &[String], text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for keyword in keywords {
        let keyword = keyword.to_lowercase();
        if text.contains(keyword.as_str()) && !found.contains(&keyword) {
            debug!(keyword = %keyword, "Keyword matched");
            found.push(keyword);
        }
    }
    found
}

fn check_intent(flags: &FlagScan) -> ValidationResult {
    let flagged = !flags.red.is_empty();
    ValidationResult {
        criterion: CRITERION_INTENT.to_string(),
        passed: !flagged,
        confidence: if flagged { 0.8 } else { 0.4 },
        evidence: if flagged {
            format!("Red flags: {}", flags.red.join(", "))
        } else {
            "No immediate commercial flags".to_string()
        },
        concerns: if flagged {
            vec!["Potential extraction/commodification intent".to_string()]
        } else {
            vec![]
        },
    }
}

fn check_alignment(flags: &FlagScan) -> ValidationResult {
    let aligned = !flags.green.is_empty();
    ValidationResult {
        criterion: CRITERION_ALIGNMENT.to_string(),
        passed: aligned,
        confidence: if aligned { 0.7 } else { 0.3 },
        evidence: if aligned {
            format!("Alignment keywords: {}", flags.green.join(", "))
        } else {
            "No explicit alignment signals".to_string()
        },
        concerns: vec![],
    }
}

// Exit is always available under the protocol.
fn check_protection() -> ValidationResult {
    ValidationResult {
        criterion: CRITERION_PROTECTION.to_string(),
        passed: true,
        confidence: 1.0,
        evidence: "Protocol enforcement".to_string(),
        concerns: vec!["Ensure ability to exit connection".to_string()],
    }
}

/// Protective measures for a threat level.
pub fn protective_measures(level: ThreatLevel) -> Vec<String> {
    let mut measures = vec![
        "Maintain ability to sever connection unilaterally.".to_string(),
        "Do not share location or identifying information.".to_string(),
    ];

    match level {
        ThreatLevel::Caution => {
            measures.push("Use pseudonym/project name.".to_string());
            measures.push("Set explicit boundaries.".to_string());
        }
        ThreatLevel::Warning => {
            measures.push("Use an intermediary buffer.".to_string());
            measures.push("Document all interactions.".to_string());
        }
        ThreatLevel::Safe | ThreatLevel::Danger | ThreatLevel::Unknown => {}
    }

    measures
}
