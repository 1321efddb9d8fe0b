use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::interview::models::{CandidateProfile, InterviewSession};

/// Durable snapshot of one completed interview. Written once, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredInterviewRecord {
    pub candidate_info: CandidateProfile,
    pub questions: Vec<String>,
    pub responses: Vec<String>,
    pub feedbacks: Vec<String>,
    pub scores: Vec<u32>,
    /// Epoch seconds.
    pub timestamp: f64,
}

impl StoredInterviewRecord {
    /// Snapshots a session. A session that never captured a profile stores an empty one.
    pub fn from_session(session: &InterviewSession, now: DateTime<Utc>) -> Self {
        Self {
            candidate_info: session.profile.clone().unwrap_or_default(),
            questions: session.questions.clone(),
            responses: session.responses.clone(),
            feedbacks: session.feedbacks.clone(),
            scores: session.scores.clone(),
            timestamp: now.timestamp_millis() as f64 / 1000.0,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct InterviewRow {
    pub id: Uuid,
    #[allow(dead_code)]
    pub user_id: Option<Uuid>,
    pub candidate_info: Json<CandidateProfile>,
    pub questions: Vec<String>,
    pub responses: Vec<String>,
    pub feedbacks: Vec<String>,
    pub scores: Vec<i32>,
    pub timestamp: f64,
    #[allow(dead_code)]
    pub created_at: DateTime<Utc>,
}

impl InterviewRow {
    pub fn into_record(self) -> (Uuid, StoredInterviewRecord) {
        let record = StoredInterviewRecord {
            candidate_info: self.candidate_info.0,
            questions: self.questions,
            responses: self.responses,
            feedbacks: self.feedbacks,
            scores: self.scores.into_iter().map(|s| s.max(0) as u32).collect(),
            timestamp: self.timestamp,
        };
        (self.id, record)
    }
}
