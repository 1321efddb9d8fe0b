//! Record Store Adapter — accounts, credentials and completed interview records.
//!
//! `AppState` holds an `Arc<dyn RecordStore>`: `PgRecordStore` in production,
//! `MemoryRecordStore` for tests and `STORE_BACKEND=memory` runs. Live
//! interview sessions are kept separately behind `session::SessionStore`.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::models::interview::StoredInterviewRecord;
use crate::models::user::{Credential, Role, UserAccount};

pub mod memory;
pub mod postgres;
pub mod session;

pub use memory::MemoryRecordStore;
pub use postgres::PgRecordStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("an account with email '{0}' already exists")]
    DuplicateAccount(String),

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("stored data is corrupt: {0}")]
    Corrupt(String),

    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

impl From<argon2::password_hash::Error> for StoreError {
    fn from(e: argon2::password_hash::Error) -> Self {
        StoreError::Hashing(e.to_string())
    }
}

/// Sign-up input.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Creates an account. Email addresses are unique (case-insensitive).
    async fn create_account(&self, account: NewAccount) -> Result<UserAccount, StoreError>;

    /// Verifies email + password and issues a fresh credential.
    async fn authenticate(&self, email: &str, password: &str) -> Result<Credential, StoreError>;

    /// Looks up the account behind a live credential.
    async fn resolve_credential(&self, token: Uuid) -> Result<Option<UserAccount>, StoreError>;

    async fn revoke_credential(&self, token: Uuid) -> Result<(), StoreError>;

    async fn get_user_role(&self, account_id: Uuid) -> Result<Option<Role>, StoreError>;

    /// Appends one completed interview and returns its store-generated id.
    async fn append_interview_record(
        &self,
        account_id: Uuid,
        record: &StoredInterviewRecord,
    ) -> Result<Uuid, StoreError>;

    /// Every stored interview, oldest first.
    async fn list_interview_records(
        &self,
    ) -> Result<Vec<(Uuid, StoredInterviewRecord)>, StoreError>;
}

/// Emails are compared and stored lowercased and trimmed.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
