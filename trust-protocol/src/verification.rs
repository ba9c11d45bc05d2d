//! Signal verification.
//!
//! Verification checks a signal against its claimed source and adjusts its
//! confidence. [`MockSignalVerifier`] simulates this with latency and a
//! random failure rate; real verifiers (GitHub, DNS, ORCID) plug in through
//! the [`SignalVerifier`] trait.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::config::VerifierConfig;
use crate::types::{Signal, ValidationRequest, VerificationStatus};

const NOTE_TOO_SHORT: &str = "Content too short to verify.";
const NOTE_TIMEOUT: &str = "Source endpoint timeout.";
const NOTE_CONFIRMED: &str = "Independently confirmed via oracle.";

/// Trait for verifying signals.
///
/// Verification never mutates the input. A failed verification is a normal
/// outcome recorded on the returned signal, not an error.
#[async_trait]
pub trait SignalVerifier: Send + Sync {
    /// Name of the verifier.
    fn name(&self) -> &str;

    /// Verify one signal and return the updated copy.
    async fn verify(&self, signal: &Signal) -> Signal;

    /// Verify every signal of a request, in order.
    async fn verify_request(&self, request: &ValidationRequest) -> ValidationRequest {
        let mut verified = Vec::with_capacity(request.signals.len());
        for signal in &request.signals {
            verified.push(self.verify(signal).await);
        }
        ValidationRequest {
            signals: verified,
            ..request.clone()
        }
    }
}

/// Simulated verifier.
///
/// Fails signals whose content is too short, fails the rest at random with
/// the configured rate and otherwise boosts confidence.
pub struct MockSignalVerifier {
    config: VerifierConfig,
    rng: Mutex<StdRng>,
}

impl MockSignalVerifier {
    /// Create a verifier with default settings and an entropy-seeded RNG.
    pub fn new() -> Self {
        Self::with_config(VerifierConfig::default())
    }

    /// Create with custom configuration.
    pub fn with_config(config: VerifierConfig) -> Self {
        Self {
            config,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Use a fixed seed so outcomes are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Set the random failure rate.
    pub fn with_failure_rate(mut self, failure_rate: f64) -> Self {
        self.config.failure_rate = failure_rate;
        self
    }

    /// Set the simulated latency.
    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.config.delay_ms = delay_ms;
        self
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    async fn roll_failure(&self) -> bool {
        let rate = if self.config.failure_rate.is_finite() {
            self.config.failure_rate.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let mut rng = self.rng.lock().await;
        rng.gen_bool(rate)
    }

    fn failed(&self, signal: &Signal, note: &str) -> Signal {
        Signal {
            verification_status: VerificationStatus::Failed,
            verification_note: Some(note.to_string()),
            confidence: self.config.failure_confidence,
            ..signal.clone()
        }
    }
}

impl Default for MockSignalVerifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SignalVerifier for MockSignalVerifier {
    fn name(&self) -> &str {
        "mock_signal_verifier"
    }

    async fn verify(&self, signal: &Signal) -> Signal {
        debug!(signal_id = %signal.id, source = signal.source.as_str(), "Verifying signal");

        if self.config.delay_ms > 0 {
            tokio::time::sleep(self.config.delay()).await;
        }

        if signal.content.chars().count() < self.config.min_content_len {
            warn!(signal_id = %signal.id, "Signal content too short to verify");
            return self.failed(signal, NOTE_TOO_SHORT);
        }

        if self.roll_failure().await {
            warn!(signal_id = %signal.id, "Simulated source endpoint timeout");
            return self.failed(signal, NOTE_TIMEOUT);
        }

        let confidence = (signal.confidence + self.config.success_boost).min(1.0);
        debug!(signal_id = %signal.id, confidence, "Signal verified");

        Signal {
            verification_status: VerificationStatus::Verified,
            verification_note: Some(NOTE_CONFIRMED.to_string()),
            confidence,
            ..signal.clone()
        }
    }
}
