//! What the display layer should show for a session. Derived, never stored.

use serde::Serialize;

use crate::interview::models::{CandidateProfile, InterviewSession, Progress, Stage};
use crate::interview::service::InterviewOutcome;

pub const GREETING: &str =
    "Welcome! I'll guide you through a short technical interview tailored to your experience.";

#[derive(Debug, Clone, Serialize)]
pub struct CompletedItem {
    pub number: usize,
    pub question: String,
    pub answer: String,
    pub feedback: String,
    pub score: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum InterviewView {
    Welcome {
        greeting: &'static str,
    },
    ProfileCapture {
        /// Prior values for pre-filling the form.
        form: CandidateProfile,
    },
    Questioning {
        question_number: usize,
        question: String,
        progress: Progress,
    },
    Complete {
        items: Vec<CompletedItem>,
        persisted: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        warning: Option<&'static str>,
    },
}

impl InterviewView {
    pub fn from_session(session: &InterviewSession, warning: Option<&'static str>) -> Self {
        match session.stage {
            Stage::Welcome => InterviewView::Welcome { greeting: GREETING },
            Stage::ProfileCapture => InterviewView::ProfileCapture {
                form: session.profile.clone().unwrap_or_default(),
            },
            Stage::Questioning => InterviewView::Questioning {
                question_number: session.current_question_index + 1,
                question: session.current_question().unwrap_or_default().to_string(),
                progress: session.progress(),
            },
            Stage::Complete => InterviewView::Complete {
                items: completed_items(session),
                persisted: session.persisted,
                warning,
            },
        }
    }
}

impl From<InterviewOutcome> for InterviewView {
    fn from(outcome: InterviewOutcome) -> Self {
        InterviewView::from_session(&outcome.session, outcome.persistence_warning)
    }
}

fn completed_items(session: &InterviewSession) -> Vec<CompletedItem> {
    session
        .questions
        .iter()
        .zip(&session.responses)
        .zip(&session.feedbacks)
        .zip(&session.scores)
        .enumerate()
        .map(|(i, (((q, a), f), &s))| CompletedItem {
            number: i + 1,
            question: q.clone(),
            answer: a.clone(),
            feedback: f.clone(),
            score: s,
        })
        .collect()
}
