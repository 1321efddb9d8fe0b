//! Bearer-token authentication and role checks.
//!
//! `AuthUser` resolves `Authorization: Bearer <token>` against the record store.
//! `CandidateUser` and `AdminUser` additionally enforce the account role.

use axum::{async_trait, extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::{Role, UserAccount};
use crate::state::AppState;

pub mod handlers;
pub mod password;

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub account: UserAccount,
    pub token: Uuid,
}

/// An authenticated account with the candidate role.
#[derive(Debug, Clone)]
pub struct CandidateUser(pub AuthUser);

/// An authenticated account with the admin role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

fn bearer_token(parts: &Parts) -> Option<Uuid> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))?;
    Uuid::parse_str(token.trim()).ok()
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let token = bearer_token(parts).ok_or(AppError::Unauthorized)?;
        let account = state
            .records
            .resolve_credential(token)
            .await?
            .ok_or(AppError::Unauthorized)?;
        Ok(AuthUser { account, token })
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CandidateUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.account.role != Role::Candidate {
            return Err(AppError::Forbidden(
                "Only candidate accounts can take interviews.".to_string(),
            ));
        }
        Ok(CandidateUser(user))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.account.role != Role::Admin {
            return Err(AppError::Forbidden("Not authorized as admin.".to_string()));
        }
        Ok(AdminUser(user))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    fn parts_with(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(h) = header {
            builder = builder.header(AUTHORIZATION, h);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_token_parsed() {
        let id = Uuid::new_v4();
        assert_eq!(bearer_token(&parts_with(Some(&format!("Bearer {id}")))), Some(id));
    }

    #[test]
    fn test_missing_or_malformed_token() {
        assert_eq!(bearer_token(&parts_with(None)), None);
        assert_eq!(bearer_token(&parts_with(Some("Basic abc"))), None);
        assert_eq!(bearer_token(&parts_with(Some("Bearer not-a-uuid"))), None);
    }
}
