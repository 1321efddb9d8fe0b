use async_trait::async_trait;
use chrono::{Duration, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::password::{spawn_hash_password, spawn_verify_password};
use crate::models::interview::{InterviewRow, StoredInterviewRecord};
use crate::models::user::{Credential, Role, UserAccount, UserRow};
use crate::store::{normalize_email, NewAccount, RecordStore, StoreError};

/// PostgreSQL-backed record store. Interview rows are append-only.
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
    token_ttl: Duration,
}

impl PgRecordStore {
    pub fn new(pool: PgPool, token_ttl: Duration) -> Self {
        Self { pool, token_ttl }
    }
}

fn account_from_row(row: UserRow) -> Result<UserAccount, StoreError> {
    let role = row.role.parse::<Role>().map_err(StoreError::Corrupt)?;
    Ok(UserAccount {
        id: row.id,
        name: row.name,
        email: row.email,
        role,
    })
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn create_account(&self, account: NewAccount) -> Result<UserAccount, StoreError> {
        let email = normalize_email(&account.email);
        let password_hash = spawn_hash_password(account.password.clone()).await?;
        let id = Uuid::new_v4();

        let result = sqlx::query(
            "INSERT INTO users (id, name, email, password_hash, role) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(&account.name)
        .bind(&email)
        .bind(&password_hash)
        .bind(account.role.as_str())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {}
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                return Err(StoreError::DuplicateAccount(email));
            }
            Err(e) => return Err(e.into()),
        }

        info!("Created {} account {id}", account.role.as_str());
        Ok(UserAccount {
            id,
            name: account.name,
            email,
            role: account.role,
        })
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<Credential, StoreError> {
        let row: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
            .bind(normalize_email(email))
            .fetch_optional(&self.pool)
            .await?;

        let row = row.ok_or(StoreError::InvalidCredentials)?;
        if !spawn_verify_password(password.to_string(), row.password_hash).await? {
            return Err(StoreError::InvalidCredentials);
        }

        let pruned =
            sqlx::query("DELETE FROM auth_tokens WHERE user_id = $1 AND expires_at <= NOW()")
                .bind(row.id)
                .execute(&self.pool)
                .await?
                .rows_affected();
        if pruned > 0 {
            debug!("Pruned {pruned} expired credentials for account {}", row.id);
        }

        let token = Uuid::new_v4();
        let expires_at = Utc::now() + self.token_ttl;
        sqlx::query("INSERT INTO auth_tokens (token, user_id, expires_at) VALUES ($1, $2, $3)")
            .bind(token)
            .bind(row.id)
            .bind(expires_at)
            .execute(&self.pool)
            .await?;

        Ok(Credential {
            token,
            account_id: row.id,
            expires_at,
        })
    }

    async fn resolve_credential(&self, token: Uuid) -> Result<Option<UserAccount>, StoreError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT u.* FROM auth_tokens t
            JOIN users u ON u.id = t.user_id
            WHERE t.token = $1 AND t.revoked_at IS NULL AND t.expires_at > NOW()
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        row.map(account_from_row).transpose()
    }

    async fn revoke_credential(&self, token: Uuid) -> Result<(), StoreError> {
        sqlx::query(
            "UPDATE auth_tokens SET revoked_at = NOW() WHERE token = $1 AND revoked_at IS NULL",
        )
        .bind(token)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_user_role(&self, account_id: Uuid) -> Result<Option<Role>, StoreError> {
        let role: Option<String> = sqlx::query_scalar("SELECT role FROM users WHERE id = $1")
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?;

        role.map(|r| r.parse::<Role>().map_err(StoreError::Corrupt))
            .transpose()
    }

    async fn append_interview_record(
        &self,
        account_id: Uuid,
        record: &StoredInterviewRecord,
    ) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        let scores: Vec<i32> = record.scores.iter().map(|&s| s as i32).collect();

        sqlx::query(
            r#"
            INSERT INTO interviews
                (id, user_id, candidate_info, questions, responses, feedbacks, scores, timestamp)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(id)
        .bind(account_id)
        .bind(Json(&record.candidate_info))
        .bind(&record.questions)
        .bind(&record.responses)
        .bind(&record.feedbacks)
        .bind(&scores)
        .bind(record.timestamp)
        .execute(&self.pool)
        .await?;

        info!("Stored interview record {id} for account {account_id}");
        Ok(id)
    }

    async fn list_interview_records(
        &self,
    ) -> Result<Vec<(Uuid, StoredInterviewRecord)>, StoreError> {
        let rows: Vec<InterviewRow> =
            sqlx::query_as("SELECT * FROM interviews ORDER BY created_at, id")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(InterviewRow::into_record).collect())
    }
}
