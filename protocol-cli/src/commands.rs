//! Subcommands and their execution.
//!
//! Every command reads JSON input, runs one of the evaluators and returns
//! pretty-printed JSON (or YAML for `config`) for the caller to print.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Subcommand;
use serde::de::DeserializeOwned;
use tracing::info;

use interviewed::{InterviewEngine, InterviewSession};
use paw_validator::{ConnectionAnalyzer, ConnectionProposal};
use trust_protocol::{
    MockSignalVerifier, Signal, SignalVerifier, TrustEvaluator, ValidationRequest,
};

use crate::config::ProtocolConfig;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Verify a single signal
    Verify {
        /// Signal JSON file
        signal: PathBuf,
    },

    /// Issue a trust certificate for a validation request
    Certify {
        /// Validation request JSON file
        request: PathBuf,
        /// Verify each signal before scoring
        #[arg(long)]
        verify: bool,
    },

    /// Analyze a proposed connection
    Analyze {
        /// Connection proposal JSON file
        proposal: PathBuf,
    },

    /// Run an interview and derive a profile signature
    Interview {
        /// Name of the person interviewed
        #[arg(short, long)]
        subject: String,
        /// File with one answer per line (stdin when omitted)
        #[arg(short, long)]
        answers: Option<PathBuf>,
    },

    /// Print the effective configuration
    Config,
}

/// Execute a command and return its output.
pub async fn execute_command(config: &ProtocolConfig, command: Commands) -> anyhow::Result<String> {
    match command {
        Commands::Verify { signal } => {
            let signal: Signal = read_json(&signal)?;
            let verifier = MockSignalVerifier::with_config(config.trust.verifier.clone());
            let verified = verifier.verify(&signal).await;
            Ok(serde_json::to_string_pretty(&verified)?)
        }

        Commands::Certify { request, verify } => {
            let mut request: ValidationRequest = read_json(&request)?;
            if verify {
                let verifier = MockSignalVerifier::with_config(config.trust.verifier.clone());
                info!(verifier = verifier.name(), signals = request.signals.len(), "Verifying signals");
                request = verifier.verify_request(&request).await;
            }

            let evaluator = TrustEvaluator::with_config(config.trust.clone());
            let certificate = evaluator.certify(&request)?;
            Ok(serde_json::to_string_pretty(&certificate)?)
        }

        Commands::Analyze { proposal } => {
            let proposal: ConnectionProposal = read_json(&proposal)?;
            let analyzer = ConnectionAnalyzer::with_config(config.paw.clone());
            let report = analyzer.review(&proposal)?;
            Ok(serde_json::to_string_pretty(&report)?)
        }

        Commands::Interview { subject, answers } => {
            let engine = InterviewEngine::with_config(config.interview.clone());
            let session = match answers {
                Some(path) => {
                    let file = std::fs::File::open(&path)
                        .with_context(|| format!("failed to open {}", path.display()))?;
                    run_interview(&engine, &subject, std::io::BufReader::new(file), std::io::stderr())?
                }
                None => run_interview(&engine, &subject, std::io::stdin().lock(), std::io::stderr())?,
            };
            Ok(serde_json::to_string_pretty(&session)?)
        }

        Commands::Config => config.to_yaml(),
    }
}

/// Drive a session with answers read line by line.
///
/// Questions and follow-ups are written to `prompts`. Blank lines are
/// skipped. Returns the finalized session.
pub fn run_interview(
    engine: &InterviewEngine,
    subject: &str,
    answers: impl BufRead,
    mut prompts: impl Write,
) -> anyhow::Result<InterviewSession> {
    let mut session = engine.start_interview(subject);
    let mut lines = answers.lines();

    while let Some(question) = session.current_question() {
        writeln!(prompts, "{}", question.text)?;

        let answer = loop {
            match lines.next() {
                Some(line) => {
                    let line = line?;
                    if !line.trim().is_empty() {
                        break line;
                    }
                }
                None => bail!(
                    "ran out of answers after {} of {} questions",
                    session.responses.len(),
                    session.questions.len()
                ),
            }
        };

        session = engine.submit_answer(&session, &answer)?;
        if let Some(follow_up) = &session.last_follow_up {
            writeln!(prompts, "  -> {}", follow_up)?;
        }
    }

    Ok(engine.finalize(&session)?)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const ANSWERS: &str = "\
I want to belong somewhere

People ask me to listen
I walk until it clears
Quiet early mornings
Complex people problems
Patience
A move abroad
Clean water
";

    #[test]
    fn test_run_interview_from_lines() {
        let engine = InterviewEngine::new();
        let mut prompts = Vec::new();

        let session = run_interview(&engine, "Ada", Cursor::new(ANSWERS), &mut prompts).unwrap();
        assert!(session.is_completed());
        assert_eq!(session.responses.len(), 8);

        let signature = session.signature.unwrap();
        assert_eq!(signature.hungers, vec!["connection"]);
        assert_eq!(signature.movement_pattern, "stepping-back");
        assert_eq!(signature.activation_environment, "solitude");

        let prompts = String::from_utf8(prompts).unwrap();
        assert!(prompts.contains("What happens during the walk?"));
    }

    #[test]
    fn test_run_interview_runs_out() {
        let engine = InterviewEngine::new();
        let err = run_interview(&engine, "Ada", Cursor::new("one\ntwo\n"), std::io::sink()).unwrap_err();
        assert!(err.to_string().contains("2 of 8"));
    }

    #[tokio::test]
    async fn test_analyze_command() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("proposal.json");
        std::fs::write(
            &path,
            r#"{"type": "collaboration", "target": "Commons Lab", "content": "Let's collaborate on open source commons research"}"#,
        )
        .unwrap();

        let output = execute_command(&ProtocolConfig::default(), Commands::Analyze { proposal: path })
            .await
            .unwrap();
        let report: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(report["threat_level"], "safe");
        assert_eq!(report["recommendation"], "PROCEED");
    }

    #[tokio::test]
    async fn test_certify_requires_consent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.json");
        std::fs::write(&path, r#"{"entity_name": "Ada"}"#).unwrap();

        let result = execute_command(
            &ProtocolConfig::default(),
            Commands::Certify { request: path, verify: false },
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_certify_with_verification() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.json");
        std::fs::write(
            &path,
            r#"{
                "entity_name": "Ada",
                "consent_given": true,
                "boundaries_acknowledged": true,
                "signals": [
                    {"source": "academic", "content": "PhD thesis on distributed consensus", "confidence": 0.8}
                ]
            }"#,
        )
        .unwrap();

        let mut config = ProtocolConfig::default();
        config.trust.verifier.delay_ms = 0;
        config.trust.verifier.failure_rate = 0.0;

        let output = execute_command(&config, Commands::Certify { request: path, verify: true })
            .await
            .unwrap();
        let certificate: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(certificate["id"].as_str().unwrap().starts_with("CERT-"));
        assert!(certificate["overall_score"].as_f64().unwrap() > 0.1);
    }

    #[tokio::test]
    async fn test_missing_input_file() {
        let result = execute_command(
            &ProtocolConfig::default(),
            Commands::Verify { signal: PathBuf::from("/nonexistent/signal.json") },
        )
        .await;
        assert!(result.unwrap_err().to_string().contains("failed to read"));
    }
}
