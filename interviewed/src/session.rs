//! Interview session state machine.
//!
//! A session moves strictly forward: each answer is recorded against the
//! current question, may prompt a follow-up, and advances the index. The
//! session completes when the last question has been answered. Every
//! transition returns a new session; the input is never modified.

use chrono::Utc;
use tracing::{debug, info};

use crate::config::InterviewConfig;
use crate::signature::SignatureDeriver;
use crate::types::{
    InterviewError, InterviewResponse, InterviewSession, ProfileSignature, Result, SessionStatus,
};

/// Runs interviews against a question bank.
pub struct InterviewEngine {
    config: InterviewConfig,
    deriver: SignatureDeriver,
}

impl InterviewEngine {
    /// Create an engine with the default question bank.
    pub fn new() -> Self {
        Self::with_config(InterviewConfig::default())
    }

    /// Create with custom configuration.
    pub fn with_config(config: InterviewConfig) -> Self {
        let deriver = SignatureDeriver::with_rules(config.signature.clone());
        Self { config, deriver }
    }

    pub fn config(&self) -> &InterviewConfig {
        &self.config
    }

    /// Start a new session for a subject.
    pub fn start_interview(&self, subject_name: impl Into<String>) -> InterviewSession {
        let questions = self.config.questions.clone();
        let status = if questions.is_empty() {
            SessionStatus::Completed
        } else {
            SessionStatus::InProgress
        };

        let session = InterviewSession {
            id: format!("SESS-{}", Utc::now().timestamp_millis()),
            subject_name: subject_name.into(),
            questions,
            responses: Vec::new(),
            current_question_index: 0,
            status,
            last_follow_up: None,
            signature: None,
        };

        info!(session_id = %session.id, questions = session.questions.len(), "Started interview");
        session
    }

    /// Record an answer to the current question.
    pub fn submit_answer(&self, session: &InterviewSession, answer: &str) -> Result<InterviewSession> {
        if answer.trim().is_empty() {
            return Err(InterviewError::EmptyAnswer);
        }

        let question = session
            .current_question()
            .ok_or_else(|| InterviewError::SessionCompleted(session.id.clone()))?;

        let follow_up = question.follow_up_for(answer).map(str::to_string);
        if let Some(text) = &follow_up {
            debug!(session_id = %session.id, question_id = %question.id, follow_up = %text, "Follow-up triggered");
        }

        let mut responses = session.responses.clone();
        responses.push(InterviewResponse {
            question_id: question.id.clone(),
            response: answer.to_string(),
            recorded_at: Utc::now(),
        });

        let next_index = session.current_question_index + 1;
        let status = if next_index >= session.questions.len() {
            SessionStatus::Completed
        } else {
            SessionStatus::InProgress
        };

        if status == SessionStatus::Completed {
            info!(session_id = %session.id, answers = responses.len(), "Interview completed");
        }

        Ok(InterviewSession {
            responses,
            current_question_index: next_index,
            status,
            last_follow_up: follow_up,
            ..session.clone()
        })
    }

    /// Derive a signature from a completed session.
    ///
    /// May be called repeatedly; labels are stable, `id` and `hash` are not.
    pub fn derive_signature(&self, session: &InterviewSession) -> Result<ProfileSignature> {
        self.deriver.derive(session)
    }

    /// Derive the signature and attach it to the session.
    ///
    /// A session carries at most one signature.
    pub fn finalize(&self, session: &InterviewSession) -> Result<InterviewSession> {
        if session.signature.is_some() {
            return Err(InterviewError::SignatureAlreadyIssued(session.id.clone()));
        }

        let signature = self.derive_signature(session)?;
        Ok(InterviewSession {
            signature: Some(signature),
            ..session.clone()
        })
    }
}

impl Default for InterviewEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANSWERS: [&str; 8] = [
        "A place to belong, a real connection",
        "They come to me to listen and to be heard",
        "I usually walk away and come back later",
        "Alone in a quiet room, no deadline pressure",
        "Complex problems about people",
        "Writing",
        "Losing a job",
        "Clean water",
    ];

    #[test]
    fn test_start_interview() {
        let engine = InterviewEngine::new();
        let session = engine.start_interview("Ada");

        assert!(session.id.starts_with("SESS-"));
        assert_eq!(session.subject_name, "Ada");
        assert_eq!(session.status, SessionStatus::InProgress);
        assert_eq!(session.current_question_index, 0);
        assert_eq!(session.current_question().unwrap().id, "hunger_1");
        assert!(session.responses.is_empty());
    }

    #[test]
    fn test_completes_exactly_at_last_answer() {
        let engine = InterviewEngine::new();
        let mut session = engine.start_interview("Ada");

        for (i, answer) in ANSWERS.iter().enumerate() {
            assert_eq!(session.status, SessionStatus::InProgress, "answer {}", i);
            session = engine.submit_answer(&session, answer).unwrap();
            assert_eq!(session.current_question_index, i + 1);
            assert!(session.current_question_index <= session.questions.len());
        }

        assert_eq!(session.status, SessionStatus::Completed);
        assert_eq!(session.responses.len(), 8);
        assert_eq!(session.progress(), 1.0);
        assert!(session.current_question().is_none());
    }

    #[test]
    fn test_submit_does_not_mutate_input() {
        let engine = InterviewEngine::new();
        let session = engine.start_interview("Ada");
        let next = engine.submit_answer(&session, "meaning").unwrap();

        assert!(session.responses.is_empty());
        assert_eq!(session.current_question_index, 0);
        assert_eq!(next.responses.len(), 1);
        assert_eq!(next.responses[0].question_id, "hunger_1");
    }

    #[test]
    fn test_follow_up_set_and_cleared() {
        let engine = InterviewEngine::new();
        let mut session = engine.start_interview("Ada");
        session = engine.submit_answer(&session, "Understanding why").unwrap();
        assert_eq!(
            session.last_follow_up.as_deref(),
            Some("What would change if you understood it?")
        );

        session = engine.submit_answer(&session, "People ask me for advice").unwrap();
        assert!(session.last_follow_up.is_none());

        session = engine.submit_answer(&session, "I take a walk").unwrap();
        assert_eq!(session.last_follow_up.as_deref(), Some("What happens during the walk?"));

        session = engine.submit_answer(&session, "On stage").unwrap();
        assert!(session.last_follow_up.is_none());
    }

    #[test]
    fn test_rejects_answer_after_completion() {
        let engine = InterviewEngine::new();
        let mut session = engine.start_interview("Ada");
        for answer in ANSWERS {
            session = engine.submit_answer(&session, answer).unwrap();
        }

        let result = engine.submit_answer(&session, "one more");
        assert!(matches!(result, Err(InterviewError::SessionCompleted(_))));
    }

    #[test]
    fn test_rejects_blank_answer() {
        let engine = InterviewEngine::new();
        let session = engine.start_interview("Ada");
        let result = engine.submit_answer(&session, "   ");
        assert!(matches!(result, Err(InterviewError::EmptyAnswer)));
    }

    #[test]
    fn test_signature_requires_completion() {
        let engine = InterviewEngine::new();
        let session = engine.start_interview("Ada");
        let session = engine.submit_answer(&session, "meaning").unwrap();

        assert!(matches!(
            engine.derive_signature(&session),
            Err(InterviewError::NotCompleted(_))
        ));
        assert!(engine.finalize(&session).is_err());
    }

    #[test]
    fn test_finalize_once() {
        let engine = InterviewEngine::new();
        let mut session = engine.start_interview("Ada");
        for answer in ANSWERS {
            session = engine.submit_answer(&session, answer).unwrap();
        }

        let finalized = engine.finalize(&session).unwrap();
        let signature = finalized.signature.as_ref().unwrap();
        assert_eq!(signature.movement_pattern, "stepping-back");
        assert_eq!(signature.activation_environment, "solitude");

        assert!(matches!(
            engine.finalize(&finalized),
            Err(InterviewError::SignatureAlreadyIssued(_))
        ));
    }
}
