//! Pure interview state machine.
//!
//! `transition(&session, event)` returns the next session value and performs no
//! I/O. The service runs gateway and store calls first and feeds their results
//! in as events, so a failed call never leaves a half-updated session behind.

use thiserror::Error;

use crate::interview::models::{CandidateProfile, InterviewSession, Stage};

/// Inputs to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Candidate pressed "Start" on the welcome screen.
    Start,
    /// Profile form submitted and questions generated (already normalized).
    ProfileSubmitted {
        profile: CandidateProfile,
        questions: Vec<String>,
    },
    /// The current question was answered, critiqued and scored.
    AnswerEvaluated {
        response: String,
        feedback: String,
        score: u32,
    },
    /// The completed session was written to the record store.
    Persisted,
    /// "Start New Interview": back to a fresh welcome screen.
    Reset,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::Start => "start",
            Event::ProfileSubmitted { .. } => "profile_submitted",
            Event::AnswerEvaluated { .. } => "answer_evaluated",
            Event::Persisted => "persisted",
            Event::Reset => "reset",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("'{event}' is not valid while the interview is in the {stage} stage")]
pub struct TransitionError {
    pub stage: Stage,
    pub event: &'static str,
}

pub fn transition(
    session: &InterviewSession,
    event: Event,
) -> Result<InterviewSession, TransitionError> {
    match (session.stage, event) {
        (_, Event::Reset) => Ok(InterviewSession::new()),

        (Stage::Welcome, Event::Start) => Ok(InterviewSession {
            stage: Stage::ProfileCapture,
            ..session.clone()
        }),

        (Stage::ProfileCapture, Event::ProfileSubmitted { profile, questions }) => {
            let mut next = InterviewSession {
                profile: Some(profile),
                questions,
                responses: Vec::new(),
                feedbacks: Vec::new(),
                scores: Vec::new(),
                stage: Stage::Questioning,
                current_question_index: 0,
                persisted: false,
            };
            if next.questions_exhausted() {
                next.stage = Stage::Complete;
            }
            Ok(next)
        }

        (
            Stage::Questioning,
            Event::AnswerEvaluated {
                response,
                feedback,
                score,
            },
        ) if !session.questions_exhausted() => {
            let mut next = session.clone();
            next.responses.push(response);
            next.feedbacks.push(feedback);
            next.scores.push(score);
            next.current_question_index += 1;
            if next.questions_exhausted() {
                next.stage = Stage::Complete;
            }
            Ok(next)
        }

        (Stage::Complete, Event::Persisted) => Ok(InterviewSession {
            persisted: true,
            ..session.clone()
        }),

        (stage, event) => Err(TransitionError {
            stage,
            event: event.name(),
        }),
    }
}
