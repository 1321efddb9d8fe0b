//! Per-account storage for the live `InterviewSession`.
//!
//! Each candidate account owns at most one in-flight session. Handlers load it,
//! run a transition, and save the result back; nothing is shared across accounts.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::interview::models::InterviewSession;

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("session encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, account_id: Uuid) -> Result<Option<InterviewSession>, SessionStoreError>;

    async fn save(
        &self,
        account_id: Uuid,
        session: &InterviewSession,
    ) -> Result<(), SessionStoreError>;
}

fn session_key(account_id: Uuid) -> String {
    format!("interview:session:{account_id}")
}

/// Stores each session as a JSON string with a sliding TTL.
#[derive(Clone)]
pub struct RedisSessionStore {
    client: redis::Client,
    ttl_secs: u64,
}

impl RedisSessionStore {
    pub fn new(client: redis::Client, ttl_secs: u64) -> Self {
        Self { client, ttl_secs }
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, account_id: Uuid) -> Result<Option<InterviewSession>, SessionStoreError> {
        let mut con = self.client.get_multiplexed_async_connection().await?;
        let raw: Option<String> = redis::cmd("GET")
            .arg(session_key(account_id))
            .query_async(&mut con)
            .await?;

        Ok(raw.map(|s| serde_json::from_str(&s)).transpose()?)
    }

    async fn save(
        &self,
        account_id: Uuid,
        session: &InterviewSession,
    ) -> Result<(), SessionStoreError> {
        let payload = serde_json::to_string(session)?;
        let mut con = self.client.get_multiplexed_async_connection().await?;
        redis::cmd("SET")
            .arg(session_key(account_id))
            .arg(payload)
            .arg("EX")
            .arg(self.ttl_secs)
            .query_async::<_, ()>(&mut con)
            .await?;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<Uuid, InterviewSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, account_id: Uuid) -> Result<Option<InterviewSession>, SessionStoreError> {
        Ok(self.sessions.read().await.get(&account_id).cloned())
    }

    async fn save(
        &self,
        account_id: Uuid,
        session: &InterviewSession,
    ) -> Result<(), SessionStoreError> {
        self.sessions
            .write()
            .await
            .insert(account_id, session.clone());
        Ok(())
    }
}
