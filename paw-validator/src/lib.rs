//! Paw Validator - safety analysis for incoming connections
//!
//! Someone wants something: an introduction, a collaboration, a spot on a
//! stage. The [`ConnectionAnalyzer`] reads the [`ConnectionProposal`], looks
//! for extraction language (red flags) and commons language (green flags),
//! and returns a [`ConnectionReport`] with a [`ThreatLevel`], a recommendation
//! and protective measures.

pub mod analyzer;
pub mod config;
pub mod types;

// Re-export main types
pub use analyzer::{ConnectionAnalyzer, FlagScan};
pub use config::PawConfig;
pub use types::*;
