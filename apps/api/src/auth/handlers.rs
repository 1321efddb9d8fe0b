use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::user::{Role, UserAccount};
use crate::state::AppState;
use crate::store::NewAccount;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// The portal being logged into. Admin logins require the admin role.
    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: Uuid,
    pub expires_at: DateTime<Utc>,
    pub role: Role,
    pub name: String,
}

/// POST /api/v1/auth/signup
pub async fn handle_signup(
    State(state): State<AppState>,
    Json(request): Json<NewAccount>,
) -> Result<(StatusCode, Json<UserAccount>), AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }
    if !request.email.contains('@') {
        return Err(AppError::Validation("email is not valid".to_string()));
    }
    if request.password.is_empty() {
        return Err(AppError::Validation("password cannot be empty".to_string()));
    }

    let account = state.records.create_account(request).await?;
    info!("Sign up: {} account {}", account.role.as_str(), account.id);
    Ok((StatusCode::CREATED, Json(account)))
}

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let credential = state
        .records
        .authenticate(&request.email, &request.password)
        .await?;

    let stored_role = state
        .records
        .get_user_role(credential.account_id)
        .await?
        .unwrap_or_default();

    if request.role == Role::Admin && stored_role != Role::Admin {
        warn!(
            "Admin login refused for non-admin account {}",
            credential.account_id
        );
        state.records.revoke_credential(credential.token).await?;
        return Err(AppError::Forbidden("Not authorized as admin.".to_string()));
    }

    let account = state
        .records
        .resolve_credential(credential.token)
        .await?
        .ok_or(AppError::Unauthorized)?;

    info!("Login: {} account {}", stored_role.as_str(), account.id);
    Ok(Json(LoginResponse {
        token: credential.token,
        expires_at: credential.expires_at,
        role: stored_role,
        name: account.name,
    }))
}

/// POST /api/v1/auth/logout
pub async fn handle_logout(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<StatusCode, AppError> {
    state.records.revoke_credential(user.token).await?;
    info!("Logout: account {}", user.account.id);
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
pub async fn handle_me(user: AuthUser) -> Json<UserAccount> {
    Json(user.account)
}
