//! Trust Protocol - signal verification and trust certificates
//!
//! An entity asks to be trusted by submitting a [`ValidationRequest`]: consent,
//! acknowledged boundaries and a list of [`Signal`]s (academic work, open source
//! contributions, community presence, vouching). The protocol:
//!
//! - **Verifies** signals through a [`SignalVerifier`] (mocked by [`MockSignalVerifier`])
//! - **Scores** seven weighted domains, from identity to humanity
//! - **Issues** a [`TrustCertificate`] with a [`TrustLevel`] and protective recommendations
//!
//! # Example
//!
//! ```ignore
//! use trust_protocol::{MockSignalVerifier, Signal, SignalSource, SignalVerifier, TrustEvaluator, ValidationRequest};
//!
//! let request = ValidationRequest::new("Ada")
//!     .with_consent()
//!     .with_signal(Signal::new(SignalSource::OpenSource, "github.com/ada", 0.7));
//!
//! let request = MockSignalVerifier::new().verify_request(&request).await;
//! let certificate = TrustEvaluator::new().certify(&request)?;
//! ```

pub mod config;
pub mod evaluator;
pub mod types;
pub mod verification;

// Re-export main types
pub use config::TrustConfig;
pub use evaluator::TrustEvaluator;
pub use types::*;
pub use verification::{MockSignalVerifier, SignalVerifier};
