//! Interviewed - guided interviews that derive a profile signature.
//!
//! An interview asks one question per signature dimension (hunger, gift,
//! movement, environment, affinity, edge, wound, vision). Answers may prompt
//! a follow-up. Once every question is answered, keyword tables turn the
//! answers into a [`ProfileSignature`] describing what the subject seeks,
//! offers, and where they thrive.
//!
//! ```
//! use interviewed::InterviewEngine;
//!
//! let engine = InterviewEngine::new();
//! let mut session = engine.start_interview("Ada");
//! while !session.is_completed() {
//!     session = engine.submit_answer(&session, "I take a walk").unwrap();
//! }
//! let signature = engine.derive_signature(&session).unwrap();
//! assert_eq!(signature.movement_pattern, "stepping-back");
//! ```

pub mod config;
pub mod questions;
pub mod session;
pub mod signature;
pub mod types;

pub use config::{InterviewConfig, SignatureRules};
pub use questions::default_questions;
pub use session::InterviewEngine;
pub use signature::SignatureDeriver;
pub use types::*;
