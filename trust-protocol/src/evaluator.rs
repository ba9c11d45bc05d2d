//! Trust evaluation.
//!
//! Scores each [`ValidationDomain`] from the signals that map to it, combines
//! the domain scores with the configured weights and maps the result to a
//! [`TrustLevel`].

use chrono::{Duration, Utc};
use rand::Rng;
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::config::TrustConfig;
use crate::types::{
    DomainResult, Result, Signal, SignalSource, TrustCertificate, TrustLevel, ValidationDomain,
    ValidationRequest,
};

/// Score and confidence for a domain with no evidence.
const EMPTY_DOMAIN_SCORE: f64 = 0.1;

const CONCERN_NO_SIGNALS: &str = "No relevant signals provided";
const CONCERN_INSUFFICIENT: &str = "Insufficient high-quality evidence";
const CONCERN_FAILED: &str = "Some signals failed independent verification.";
const CONCERN_INTERIORITY: &str = "Lacks expression of interiority (creative/community signals)";

const ID_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Issues trust certificates.
pub struct TrustEvaluator {
    config: TrustConfig,
}

impl TrustEvaluator {
    /// Create an evaluator with the default tables.
    pub fn new() -> Self {
        Self::with_config(TrustConfig::default())
    }

    /// Create with custom configuration.
    pub fn with_config(config: TrustConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrustConfig {
        &self.config
    }

    /// Validate the request, then issue a certificate.
    pub fn certify(&self, request: &ValidationRequest) -> Result<TrustCertificate> {
        request.validate()?;
        Ok(self.issue_certificate(request))
    }

    /// Issue a certificate for a well-formed request.
    pub fn issue_certificate(&self, request: &ValidationRequest) -> TrustCertificate {
        let domain_results: BTreeMap<ValidationDomain, DomainResult> = ValidationDomain::all()
            .into_iter()
            .map(|domain| (domain, self.score_domain(domain, &request.signals)))
            .collect();

        let overall_score = self.overall_score(&domain_results);
        let trust_level = self.trust_level(overall_score, &request.signals);

        let issued_at = Utc::now();
        let expires_at = issued_at + Duration::days(self.validity_days(trust_level));

        let certificate = TrustCertificate {
            id: certificate_id(&mut rand::thread_rng()),
            entity_id: request.id.clone(),
            trust_level,
            domain_results,
            overall_score,
            protective_recommendations: recommendations(trust_level),
            issued_at,
            expires_at,
        };

        info!(
            certificate_id = %certificate.id,
            entity_id = %certificate.entity_id,
            trust_level = trust_level.as_str(),
            overall_score,
            "Issued trust certificate"
        );

        certificate
    }

    /// Score one domain from the signals whose source maps to it.
    pub fn score_domain(&self, domain: ValidationDomain, signals: &[Signal]) -> DomainResult {
        let relevant: Vec<&Signal> = signals
            .iter()
            .filter(|s| self.config.domains_for(s.source).contains(&domain))
            .collect();

        if relevant.is_empty() {
            return DomainResult {
                score: EMPTY_DOMAIN_SCORE,
                confidence: EMPTY_DOMAIN_SCORE,
                signals_used: 0,
                concerns: vec![CONCERN_NO_SIGNALS.to_string()],
            };
        }

        let scoring = &self.config.scoring;
        let count = relevant.len() as f64;

        let avg_confidence = relevant.iter().map(|s| s.confidence).sum::<f64>() / count;
        let verified = relevant.iter().filter(|s| s.is_verified()).count() as f64;
        let bonus = (verified * scoring.verified_bonus).min(scoring.verified_bonus_cap);
        let score = (avg_confidence + bonus).clamp(0.0, 1.0);

        let mut concerns = Vec::new();
        if score < scoring.insufficient_evidence_below {
            concerns.push(CONCERN_INSUFFICIENT.to_string());
        }
        if relevant.iter().any(|s| s.is_failed()) {
            concerns.push(CONCERN_FAILED.to_string());
        }
        if domain == ValidationDomain::Humanity
            && !relevant.iter().any(|s| s.source.expresses_interiority())
        {
            concerns.push(CONCERN_INTERIORITY.to_string());
        }

        debug!(
            domain = domain.as_str(),
            signals = relevant.len(),
            score,
            "Scored domain"
        );

        DomainResult {
            score,
            confidence: (count * scoring.confidence_per_signal).min(1.0),
            signals_used: relevant.len(),
            concerns,
        }
    }

    /// Weighted average of domain scores.
    ///
    /// Returns 0.0 when the configured weights sum to zero.
    pub fn overall_score(&self, results: &BTreeMap<ValidationDomain, DomainResult>) -> f64 {
        let (weighted, total) = results.iter().fold((0.0_f64, 0.0_f64), |(sum, total), (domain, result)| {
            let weight = self.config.weight(*domain);
            (sum + result.score * weight, total + weight)
        });

        if total <= 0.0 {
            return 0.0;
        }
        weighted / total
    }

    /// Map an overall score to a trust level.
    pub fn trust_level(&self, score: f64, signals: &[Signal]) -> TrustLevel {
        let t = &self.config.thresholds;
        let has_vouching = signals.iter().any(|s| {
            s.source == SignalSource::Vouching && s.is_verified() && s.confidence > t.vouching_confidence
        });

        if score >= t.vouched && has_vouching {
            TrustLevel::Vouched
        } else if score >= t.verified {
            TrustLevel::Verified
        } else if score >= t.substantial {
            TrustLevel::Substantial
        } else if score >= t.partial {
            TrustLevel::Partial
        } else {
            TrustLevel::Consented
        }
    }

    /// Validity period for a level.
    ///
    /// Only `Verified` receives the extended period; `Vouched` does not.
    pub fn validity_days(&self, level: TrustLevel) -> i64 {
        match level {
            TrustLevel::Verified => self.config.validity.extended_days,
            TrustLevel::Unvetted
            | TrustLevel::Consented
            | TrustLevel::Partial
            | TrustLevel::Substantial
            | TrustLevel::Vouched => self.config.validity.standard_days,
        }
    }
}

impl Default for TrustEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// Protective recommendations for a trust level.
pub fn recommendations(level: TrustLevel) -> Vec<String> {
    let mut recs = vec!["Maintain ability to sever connection at any time.".to_string()];

    match level {
        TrustLevel::Partial | TrustLevel::Consented => {
            recs.push("Limit engagement to bounded interactions.".to_string());
            recs.push("Do not share personal PII.".to_string());
        }
        TrustLevel::Substantial => {
            recs.push("Proceed with measured engagement.".to_string());
            recs.push("Verify claims before deepening.".to_string());
        }
        TrustLevel::Unvetted | TrustLevel::Verified | TrustLevel::Vouched => {}
    }

    recs
}

fn certificate_id(rng: &mut impl Rng) -> String {
    let suffix: String = (0..9)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect();
    format!("CERT-{}", suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VerificationStatus;

    fn verified(source: SignalSource, confidence: f64) -> Signal {
        Signal::new(source, "evidence.example", confidence).with_status(VerificationStatus::Verified)
    }

    fn request_with(signals: Vec<Signal>) -> ValidationRequest {
        signals
            .into_iter()
            .fold(ValidationRequest::new("Ada").with_consent(), |r, s| r.with_signal(s))
    }

    #[test]
    fn test_no_signals_yields_consented() {
        let evaluator = TrustEvaluator::new();
        let cert = evaluator.issue_certificate(&request_with(vec![]));

        assert_eq!(cert.domain_results.len(), 7);
        for result in cert.domain_results.values() {
            assert_eq!(result.score, 0.1);
            assert_eq!(result.confidence, 0.1);
            assert_eq!(result.signals_used, 0);
            assert_eq!(result.concerns, vec![CONCERN_NO_SIGNALS.to_string()]);
        }
        assert!((cert.overall_score - 0.1).abs() < 1e-9);
        assert_eq!(cert.trust_level, TrustLevel::Consented);
        assert_eq!(cert.validity_days(), 30);
        assert!(cert
            .protective_recommendations
            .contains(&"Do not share personal PII.".to_string()));
    }

    #[test]
    fn test_vouched_certificate() {
        let evaluator = TrustEvaluator::new();
        let request = request_with(vec![
            verified(SignalSource::Vouching, 0.95),
            verified(SignalSource::Academic, 0.9),
            verified(SignalSource::Community, 0.9),
            verified(SignalSource::OpenSource, 0.9),
            verified(SignalSource::Professional, 0.9),
        ]);

        let cert = evaluator.certify(&request).unwrap();
        assert!(cert.overall_score >= 0.90);
        assert_eq!(cert.trust_level, TrustLevel::Vouched);
        // Literal expiry rule: only Verified gets the extended period
        assert_eq!(cert.validity_days(), 30);
        assert_eq!(
            cert.protective_recommendations,
            vec!["Maintain ability to sever connection at any time.".to_string()]
        );
    }

    #[test]
    fn test_unverified_vouching_does_not_vouch() {
        let evaluator = TrustEvaluator::new();
        let request = request_with(vec![
            Signal::new(SignalSource::Vouching, "vouched by Grace", 1.0),
            verified(SignalSource::Academic, 1.0),
            verified(SignalSource::Community, 1.0),
            verified(SignalSource::OpenSource, 1.0),
        ]);

        let cert = evaluator.issue_certificate(&request);
        assert!(cert.overall_score >= 0.90);
        assert_eq!(cert.trust_level, TrustLevel::Verified);
        assert_eq!(cert.validity_days(), 180);
    }

    #[test]
    fn test_verified_without_vouching() {
        let evaluator = TrustEvaluator::new();
        let request = request_with(vec![
            verified(SignalSource::Academic, 1.0),
            verified(SignalSource::Community, 1.0),
            verified(SignalSource::OpenSource, 1.0),
        ]);

        let cert = evaluator.issue_certificate(&request);
        let reputation = cert.domain(ValidationDomain::Reputation).unwrap();
        assert_eq!(reputation.signals_used, 0);
        assert!((cert.overall_score - 0.91).abs() < 1e-9);
        assert_eq!(cert.trust_level, TrustLevel::Verified);
        assert_eq!(cert.validity_days(), 180);
    }

    #[test]
    fn test_substantial_and_partial_bands() {
        let evaluator = TrustEvaluator::new();

        let substantial = evaluator.issue_certificate(&request_with(vec![
            Signal::new(SignalSource::Academic, "paper", 0.8),
            Signal::new(SignalSource::Community, "forum", 0.8),
        ]));
        assert!((substantial.overall_score - 0.73).abs() < 1e-9);
        assert_eq!(substantial.trust_level, TrustLevel::Substantial);
        assert!(substantial
            .protective_recommendations
            .contains(&"Verify claims before deepening.".to_string()));

        let partial = evaluator.issue_certificate(&request_with(vec![
            Signal::new(SignalSource::Academic, "paper", 0.6),
            Signal::new(SignalSource::Community, "forum", 0.6),
        ]));
        assert!((partial.overall_score - 0.55).abs() < 1e-9);
        assert_eq!(partial.trust_level, TrustLevel::Partial);
    }

    #[test]
    fn test_domain_concerns() {
        let evaluator = TrustEvaluator::new();
        let signals = vec![
            Signal::new(SignalSource::Academic, "paper", 0.2).with_status(VerificationStatus::Failed),
        ];

        let humanity = evaluator.score_domain(ValidationDomain::Humanity, &signals);
        assert_eq!(humanity.signals_used, 1);
        assert!((humanity.confidence - 0.2).abs() < 1e-9);
        assert!(humanity.concerns.contains(&CONCERN_INSUFFICIENT.to_string()));
        assert!(humanity.concerns.contains(&CONCERN_FAILED.to_string()));
        assert!(humanity.concerns.contains(&CONCERN_INTERIORITY.to_string()));

        let identity = evaluator.score_domain(ValidationDomain::Identity, &signals);
        assert!(!identity.concerns.contains(&CONCERN_INTERIORITY.to_string()));
    }

    #[test]
    fn test_verified_bonus_is_capped() {
        let evaluator = TrustEvaluator::new();
        let signals: Vec<Signal> = (0..4).map(|_| verified(SignalSource::Professional, 0.1)).collect();

        let identity = evaluator.score_domain(ValidationDomain::Identity, &signals);
        assert!((identity.score - 0.6).abs() < 1e-9);
        assert_eq!(identity.confidence, 0.8);
    }

    #[test]
    fn test_scores_stay_in_range() {
        let evaluator = TrustEvaluator::new();
        let mut signals = Vec::new();
        for source in SignalSource::all() {
            for confidence in [0.0, 0.33, 1.0] {
                signals.push(Signal::new(source, "evidence", confidence));
                signals.push(verified(source, confidence));
            }
        }

        let cert = evaluator.issue_certificate(&request_with(signals));
        for result in cert.domain_results.values() {
            assert!((0.0..=1.0).contains(&result.score));
            assert!((0.0..=1.0).contains(&result.confidence));
        }
        let min = cert.domain_results.values().map(|r| r.score).fold(f64::MAX, f64::min);
        let max = cert.domain_results.values().map(|r| r.score).fold(f64::MIN, f64::max);
        assert!(cert.overall_score >= min - 1e-9 && cert.overall_score <= max + 1e-9);
    }

    #[test]
    fn test_zero_weights_are_guarded() {
        let mut config = TrustConfig::default();
        for criterion in &mut config.domains {
            criterion.weight = 0.0;
        }
        let evaluator = TrustEvaluator::with_config(config);

        let cert = evaluator.issue_certificate(&request_with(vec![]));
        assert_eq!(cert.overall_score, 0.0);
        assert_eq!(cert.trust_level, TrustLevel::Consented);
    }

    #[test]
    fn test_certify_rejects_missing_consent() {
        let evaluator = TrustEvaluator::new();
        let request = ValidationRequest::new("Ada");
        assert!(evaluator.certify(&request).is_err());
    }

    #[test]
    fn test_certificate_expiry() {
        let cert = TrustEvaluator::new().issue_certificate(&request_with(vec![]));
        assert_eq!(cert.validity_days(), 30);

        assert!(!cert.is_expired_at(cert.issued_at));
        assert!(!cert.is_expired_at(cert.expires_at - chrono::Duration::seconds(1)));
        assert!(cert.is_expired_at(cert.expires_at));
        assert!(cert.is_expired_at(cert.expires_at + chrono::Duration::days(1)));
    }

    #[test]
    fn test_certificate_id_format() {
        let cert = TrustEvaluator::new().issue_certificate(&request_with(vec![]));
        assert!(cert.id.starts_with("CERT-"));
        assert_eq!(cert.id.len(), 14);
        assert!(cert.id[5..].chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }
}
