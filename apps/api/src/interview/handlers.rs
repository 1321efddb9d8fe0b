use axum::{extract::State, Json};
use serde::Deserialize;

use crate::auth::CandidateUser;
use crate::errors::AppError;
use crate::interview::models::CandidateProfile;
use crate::interview::view::InterviewView;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

/// GET /api/v1/interview
pub async fn handle_get_interview(
    State(state): State<AppState>,
    CandidateUser(user): CandidateUser,
) -> Result<Json<InterviewView>, AppError> {
    let outcome = state.interviews.current(user.account.id).await?;
    Ok(Json(outcome.into()))
}

/// POST /api/v1/interview/start
pub async fn handle_start(
    State(state): State<AppState>,
    CandidateUser(user): CandidateUser,
) -> Result<Json<InterviewView>, AppError> {
    let outcome = state.interviews.start(user.account.id).await?;
    Ok(Json(outcome.into()))
}

/// POST /api/v1/interview/profile
///
/// Stores the profile and generates the questions. Blocks until the completion
/// backend answers.
pub async fn handle_submit_profile(
    State(state): State<AppState>,
    CandidateUser(user): CandidateUser,
    Json(profile): Json<CandidateProfile>,
) -> Result<Json<InterviewView>, AppError> {
    let outcome = state
        .interviews
        .submit_profile(user.account.id, profile)
        .await?;
    Ok(Json(outcome.into()))
}

/// POST /api/v1/interview/answer
pub async fn handle_submit_answer(
    State(state): State<AppState>,
    CandidateUser(user): CandidateUser,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<InterviewView>, AppError> {
    let outcome = state
        .interviews
        .submit_answer(user.account.id, request.answer)
        .await?;
    Ok(Json(outcome.into()))
}

/// POST /api/v1/interview/reset
pub async fn handle_reset(
    State(state): State<AppState>,
    CandidateUser(user): CandidateUser,
) -> Result<Json<InterviewView>, AppError> {
    let outcome = state.interviews.reset(user.account.id).await?;
    Ok(Json(outcome.into()))
}
