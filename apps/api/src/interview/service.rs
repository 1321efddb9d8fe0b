//! Interview Service — runs the side effects around the pure state machine.
//!
//! Flow per command: load session → validate stage → gateway call(s) →
//! `transition()` → save session → persist the record once the interview is
//! complete. Any failure before `transition()` leaves the stored session as it was.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::gateway::{CompletionGateway, GenerationError};
use crate::interview::machine::{transition, Event, TransitionError};
use crate::interview::models::{CandidateProfile, InterviewSession, Stage};
use crate::interview::scoring::extract_score;
use crate::models::interview::StoredInterviewRecord;
use crate::store::session::SessionStore;
use crate::store::RecordStore;

pub const PERSISTENCE_WARNING: &str =
    "Your results could not be saved yet. They will be saved the next time you open this page.";

/// Session after a command, plus a warning when the completed interview could not be stored.
#[derive(Debug, Clone)]
pub struct InterviewOutcome {
    pub session: InterviewSession,
    pub persistence_warning: Option<&'static str>,
}

impl InterviewOutcome {
    fn clean(session: InterviewSession) -> Self {
        Self {
            session,
            persistence_warning: None,
        }
    }
}

#[derive(Clone)]
pub struct InterviewService {
    sessions: Arc<dyn SessionStore>,
    records: Arc<dyn RecordStore>,
    gateway: Arc<dyn CompletionGateway>,
}

impl InterviewService {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        records: Arc<dyn RecordStore>,
        gateway: Arc<dyn CompletionGateway>,
    ) -> Self {
        Self {
            sessions,
            records,
            gateway,
        }
    }

    /// Current session. Retries a pending record write when the interview is complete.
    pub async fn current(&self, account_id: Uuid) -> Result<InterviewOutcome, AppError> {
        let session = self.load(account_id).await?;
        self.persist_if_complete(account_id, session).await
    }

    pub async fn start(&self, account_id: Uuid) -> Result<InterviewOutcome, AppError> {
        let session = self.load(account_id).await?;
        let next = self.apply(account_id, &session, Event::Start).await?;
        Ok(InterviewOutcome::clean(next))
    }

    pub async fn submit_profile(
        &self,
        account_id: Uuid,
        profile: CandidateProfile,
    ) -> Result<InterviewOutcome, AppError> {
        let session = self.load(account_id).await?;
        // Reject early so a wrong-stage request never costs a completion call.
        ensure_stage(&session, Stage::ProfileCapture, "profile_submitted")?;

        info!("Generating questions for account {account_id}");
        let questions = self
            .gateway
            .generate_questions(&profile.experience, &profile.tech_stack)
            .await?;
        if questions.is_empty() {
            return Err(GenerationError::NoQuestions.into());
        }

        let next = self
            .apply(
                account_id,
                &session,
                Event::ProfileSubmitted { profile, questions },
            )
            .await?;
        self.persist_if_complete(account_id, next).await
    }

    pub async fn submit_answer(
        &self,
        account_id: Uuid,
        answer: String,
    ) -> Result<InterviewOutcome, AppError> {
        let session = self.load(account_id).await?;
        let question = session
            .current_question()
            .ok_or(TransitionError {
                stage: session.stage,
                event: "answer_evaluated",
            })?
            .to_string();

        // Feedback and score are independent; issue them together.
        let (feedback, raw_score) = tokio::try_join!(
            self.gateway.generate_feedback(&question, &answer),
            self.gateway.score_answer(&question, &answer),
        )?;
        let score = extract_score(&raw_score);

        let next = self
            .apply(
                account_id,
                &session,
                Event::AnswerEvaluated {
                    response: answer,
                    feedback,
                    score,
                },
            )
            .await?;
        self.persist_if_complete(account_id, next).await
    }

    pub async fn reset(&self, account_id: Uuid) -> Result<InterviewOutcome, AppError> {
        let session = self.load(account_id).await?;
        let next = self.apply(account_id, &session, Event::Reset).await?;
        Ok(InterviewOutcome::clean(next))
    }

    async fn load(&self, account_id: Uuid) -> Result<InterviewSession, AppError> {
        Ok(self.sessions.load(account_id).await?.unwrap_or_default())
    }

    async fn apply(
        &self,
        account_id: Uuid,
        session: &InterviewSession,
        event: Event,
    ) -> Result<InterviewSession, AppError> {
        let event_name = event.name();
        let next = transition(session, event)?;
        debug_assert!(next.invariants_hold());
        self.sessions.save(account_id, &next).await?;
        info!(
            "Interview {account_id}: {} --{event_name}--> {}",
            session.stage, next.stage
        );
        Ok(next)
    }

    /// Writes the record at most once per session. A failed write is reported
    /// as a warning and retried on the next call.
    async fn persist_if_complete(
        &self,
        account_id: Uuid,
        session: InterviewSession,
    ) -> Result<InterviewOutcome, AppError> {
        if session.stage != Stage::Complete || session.persisted {
            return Ok(InterviewOutcome::clean(session));
        }

        let record = StoredInterviewRecord::from_session(&session, Utc::now());
        match self
            .records
            .append_interview_record(account_id, &record)
            .await
        {
            Ok(record_id) => {
                info!("Persisted interview {record_id} for account {account_id}");
                let next = self.apply(account_id, &session, Event::Persisted).await?;
                Ok(InterviewOutcome::clean(next))
            }
            Err(e) => {
                warn!("Failed to persist interview for account {account_id}: {e}");
                Ok(InterviewOutcome {
                    session,
                    persistence_warning: Some(PERSISTENCE_WARNING),
                })
            }
        }
    }
}

fn ensure_stage(
    session: &InterviewSession,
    expected: Stage,
    event: &'static str,
) -> Result<(), TransitionError> {
    if session.stage == expected {
        Ok(())
    } else {
        Err(TransitionError {
            stage: session.stage,
            event,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::gateway::testing::{ScriptedGateway, UnreachableGateway};
    use crate::store::session::MemorySessionStore;
    use crate::store::MemoryRecordStore;

    struct Harness {
        service: InterviewService,
        records: Arc<MemoryRecordStore>,
        gateway: Arc<ScriptedGateway>,
    }

    fn harness(gateway: ScriptedGateway) -> Harness {
        let records = Arc::new(MemoryRecordStore::new());
        let gateway = Arc::new(gateway);
        let service = InterviewService::new(
            Arc::new(MemorySessionStore::new()),
            records.clone(),
            gateway.clone(),
        );
        Harness {
            service,
            records,
            gateway,
        }
    }

    fn profile() -> CandidateProfile {
        CandidateProfile {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            experience: "1".into(),
            position: "Backend Engineer".into(),
            tech_stack: "Python".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_end_to_end_five_questions() {
        let h = harness(ScriptedGateway::five_questions());
        let id = Uuid::new_v4();
        let mut stages = vec![h.service.current(id).await.unwrap().session.stage];

        stages.push(h.service.start(id).await.unwrap().session.stage);
        let outcome = h.service.submit_profile(id, profile()).await.unwrap();
        assert_eq!(outcome.session.questions.len(), 5);
        stages.push(outcome.session.stage);

        let mut last = outcome;
        for i in 0..5 {
            assert!(last.session.invariants_hold());
            last = h
                .service
                .submit_answer(id, format!("answer {i}"))
                .await
                .unwrap();
            assert!(last.session.invariants_hold());
            stages.push(last.session.stage);
        }

        assert_eq!(
            stages,
            vec![
                Stage::Welcome,
                Stage::ProfileCapture,
                Stage::Questioning,
                Stage::Questioning,
                Stage::Questioning,
                Stage::Questioning,
                Stage::Questioning,
                Stage::Complete,
            ]
        );
        assert!(last.session.persisted);
        assert!(last.persistence_warning.is_none());

        let stored = h.records.list_interview_records().await.unwrap();
        assert_eq!(stored.len(), 1);
        let record = &stored[0].1;
        assert_eq!(record.questions.len(), 5);
        assert_eq!(record.responses.len(), 5);
        assert_eq!(record.feedbacks.len(), 5);
        assert_eq!(record.scores, vec![80; 5]);
        assert_eq!(record.candidate_info.tech_stack, "Python");
        // 1 generation + 2 calls per answer
        assert_eq!(h.gateway.call_count(), 11);
    }

    #[tokio::test]
    async fn test_persistence_is_idempotent() {
        let h = harness(ScriptedGateway::new("Only question?", "ok", "50"));
        let id = Uuid::new_v4();
        h.service.start(id).await.unwrap();
        h.service.submit_profile(id, profile()).await.unwrap();
        h.service.submit_answer(id, "a".into()).await.unwrap();

        h.service.current(id).await.unwrap();
        h.service.current(id).await.unwrap();

        assert_eq!(h.records.list_interview_records().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_persist_warns_then_retries() {
        let h = harness(ScriptedGateway::new("Only question?", "ok", "50"));
        let id = Uuid::new_v4();
        h.service.start(id).await.unwrap();
        h.service.submit_profile(id, profile()).await.unwrap();

        h.records.set_reject_appends(true);
        let outcome = h.service.submit_answer(id, "a".into()).await.unwrap();
        assert_eq!(outcome.session.stage, Stage::Complete);
        assert!(!outcome.session.persisted);
        assert_eq!(outcome.persistence_warning, Some(PERSISTENCE_WARNING));
        assert!(h.records.list_interview_records().await.unwrap().is_empty());

        h.records.set_reject_appends(false);
        let outcome = h.service.current(id).await.unwrap();
        assert!(outcome.session.persisted);
        assert!(outcome.persistence_warning.is_none());
        assert_eq!(h.records.list_interview_records().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_fewer_questions_complete_early() {
        let h = harness(ScriptedGateway::new("Q1?\n\nQ2?\nQ3?", "ok", "Score: 60"));
        let id = Uuid::new_v4();
        h.service.start(id).await.unwrap();
        h.service.submit_profile(id, profile()).await.unwrap();
        let mut last = None;
        for _ in 0..3 {
            last = Some(h.service.submit_answer(id, "a".into()).await.unwrap());
        }
        let last = last.unwrap();
        assert_eq!(last.session.stage, Stage::Complete);
        let stored = h.records.list_interview_records().await.unwrap();
        assert_eq!(stored[0].1.scores, vec![60, 60, 60]);
    }

    #[tokio::test]
    async fn test_empty_generation_is_retryable_error() {
        let h = harness(ScriptedGateway::new("\n  \n•\n", "ok", "50"));
        let id = Uuid::new_v4();
        h.service.start(id).await.unwrap();

        let err = h.service.submit_profile(id, profile()).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Generation(GenerationError::NoQuestions)
        ));
        let current = h.service.current(id).await.unwrap();
        assert_eq!(current.session.stage, Stage::ProfileCapture);
    }

    #[tokio::test]
    async fn test_backend_failure_keeps_session_unchanged() {
        let sessions = Arc::new(MemorySessionStore::new());
        let records = Arc::new(MemoryRecordStore::new());
        let working = InterviewService::new(
            sessions.clone(),
            records.clone(),
            Arc::new(ScriptedGateway::five_questions()),
        );
        let broken =
            InterviewService::new(sessions.clone(), records.clone(), Arc::new(UnreachableGateway));
        let id = Uuid::new_v4();

        working.start(id).await.unwrap();
        assert!(matches!(
            broken.submit_profile(id, profile()).await,
            Err(AppError::Generation(_))
        ));
        assert_eq!(
            working.current(id).await.unwrap().session.stage,
            Stage::ProfileCapture
        );

        working.submit_profile(id, profile()).await.unwrap();
        working.submit_answer(id, "first".into()).await.unwrap();
        assert!(matches!(
            broken.submit_answer(id, "second".into()).await,
            Err(AppError::Generation(_))
        ));

        let session = working.current(id).await.unwrap().session;
        assert_eq!(session.current_question_index, 1);
        assert_eq!(session.responses, vec!["first".to_string()]);
        assert!(session.invariants_hold());
    }

    #[tokio::test]
    async fn test_wrong_stage_costs_no_completion_call() {
        let h = harness(ScriptedGateway::five_questions());
        let id = Uuid::new_v4();

        assert!(matches!(
            h.service.submit_answer(id, "early".into()).await,
            Err(AppError::InvalidStage(_))
        ));
        assert!(matches!(
            h.service.submit_profile(id, profile()).await,
            Err(AppError::InvalidStage(_))
        ));
        assert_eq!(h.gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_reset_after_completion() {
        let h = harness(ScriptedGateway::new("Only question?", "ok", "90"));
        let id = Uuid::new_v4();
        h.service.start(id).await.unwrap();
        h.service.submit_profile(id, profile()).await.unwrap();
        h.service.submit_answer(id, "a".into()).await.unwrap();

        let session = h.service.reset(id).await.unwrap().session;
        assert_eq!(session, InterviewSession::new());

        // A second interview produces a second record.
        h.service.start(id).await.unwrap();
        h.service.submit_profile(id, profile()).await.unwrap();
        h.service.submit_answer(id, "b".into()).await.unwrap();
        assert_eq!(h.records.list_interview_records().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated_per_account() {
        let h = harness(ScriptedGateway::five_questions());
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        h.service.start(a).await.unwrap();
        h.service.submit_profile(a, profile()).await.unwrap();

        assert_eq!(
            h.service.current(b).await.unwrap().session.stage,
            Stage::Welcome
        );
    }
}
