//! Profile signature derivation.
//!
//! Answers are grouped by dimension and matched against the keyword tables
//! in [`SignatureRules`]. Edge, wound and vision answers are recorded but not
//! yet interpreted; those fields carry the configured placeholders.

use chrono::Utc;
use rand::Rng;
use tracing::info;

use crate::config::SignatureRules;
use crate::types::{InterviewError, InterviewSession, ProfileSignature, Result, SignatureDimension};

const ID_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Derives profile signatures from completed sessions.
pub struct SignatureDeriver {
    rules: SignatureRules,
}

impl SignatureDeriver {
    /// Create a deriver with the default rule tables.
    pub fn new() -> Self {
        Self::with_rules(SignatureRules::default())
    }

    /// Create with custom rule tables.
    pub fn with_rules(rules: SignatureRules) -> Self {
        Self { rules }
    }

    /// Derive a signature using the thread-local RNG for identifiers.
    pub fn derive(&self, session: &InterviewSession) -> Result<ProfileSignature> {
        self.derive_with_rng(session, &mut rand::thread_rng())
    }

    /// Derive a signature, drawing `id` and `hash` from `rng`.
    pub fn derive_with_rng(
        &self,
        session: &InterviewSession,
        rng: &mut impl Rng,
    ) -> Result<ProfileSignature> {
        if !session.is_completed() {
            return Err(InterviewError::NotCompleted(session.id.clone()));
        }

        let rules = &self.rules;
        let hunger_text = session.text_for(SignatureDimension::Hunger);
        let gift_text = session.text_for(SignatureDimension::Gift);
        let movement_text = session.text_for(SignatureDimension::Movement);
        let environment_text = session.text_for(SignatureDimension::Environment);
        let affinity_text = session.text_for(SignatureDimension::Affinity);

        let hungers = rules.hunger.all_matches(&hunger_text);
        let gifts = rules.gift.all_matches(&gift_text);

        let anti_patterns = rules
            .anti_patterns
            .iter()
            .filter(|r| r.matches(&environment_text))
            .map(|r| r.label.clone())
            .collect();

        let signature = ProfileSignature {
            id: format!("SIG-{}", random_tag(rng, 9)),
            created_at: Utc::now(),
            movement_pattern: rules.movement.first_match(&movement_text),
            activation_environment: rules.environment.classify(&environment_text),
            affinities: rules.affinity.all_matches(&affinity_text),
            growing_edge: rules.placeholders.growing_edge.clone(),
            integrated_wounds: rules.placeholders.integrated_wounds.clone(),
            vision: rules.placeholders.vision.clone(),
            would_benefit_from: rules.would_benefit_from.directions(&hungers),
            could_benefit: rules.could_benefit.directions(&gifts),
            anti_patterns,
            hash: format!("{:08X}", rng.gen::<u32>()),
            hungers,
            gifts,
        };

        info!(
            session_id = %session.id,
            signature_id = %signature.id,
            movement = %signature.movement_pattern,
            "Derived profile signature"
        );

        Ok(signature)
    }
}

impl Default for SignatureDeriver {
    fn default() -> Self {
        Self::new()
    }
}

fn random_tag(rng: &mut impl Rng, len: usize) -> String {
    (0..len)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}
