pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::admin::handlers as admin;
use crate::auth::handlers as auth;
use crate::interview::handlers as interview;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth API
        .route("/api/v1/auth/signup", post(auth::handle_signup))
        .route("/api/v1/auth/login", post(auth::handle_login))
        .route("/api/v1/auth/logout", post(auth::handle_logout))
        .route("/api/v1/auth/me", get(auth::handle_me))
        // Candidate interview API
        .route("/api/v1/interview", get(interview::handle_get_interview))
        .route("/api/v1/interview/start", post(interview::handle_start))
        .route(
            "/api/v1/interview/profile",
            post(interview::handle_submit_profile),
        )
        .route(
            "/api/v1/interview/answer",
            post(interview::handle_submit_answer),
        )
        .route("/api/v1/interview/reset", post(interview::handle_reset))
        // Admin API
        .route("/api/v1/admin/overview", get(admin::handle_overview))
        .with_state(state)
}
