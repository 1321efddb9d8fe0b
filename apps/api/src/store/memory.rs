//! In-memory implementation of `RecordStore`.
//!
//! All data is held in process memory and lost on restart.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::password::{spawn_hash_password, spawn_verify_password};
use crate::models::interview::StoredInterviewRecord;
use crate::models::user::{Credential, Role, UserAccount};
use crate::store::{normalize_email, NewAccount, RecordStore, StoreError};

struct StoredAccount {
    account: UserAccount,
    password_hash: String,
}

#[derive(Debug, Clone, Copy)]
struct IssuedCredential {
    account_id: Uuid,
    expires_at: DateTime<Utc>,
}

impl IssuedCredential {
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

pub struct MemoryRecordStore {
    accounts: RwLock<HashMap<Uuid, StoredAccount>>,
    credentials: RwLock<HashMap<Uuid, IssuedCredential>>,
    /// Insertion order is the listing order.
    interviews: RwLock<Vec<(Uuid, StoredInterviewRecord)>>,
    token_ttl: Duration,
    reject_appends: AtomicBool,
}

impl Default for MemoryRecordStore {
    fn default() -> Self {
        Self {
            accounts: RwLock::default(),
            credentials: RwLock::default(),
            interviews: RwLock::default(),
            token_ttl: Duration::days(1),
            reject_appends: AtomicBool::new(false),
        }
    }
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token_ttl(mut self, token_ttl: Duration) -> Self {
        self.token_ttl = token_ttl;
        self
    }

    #[cfg(test)]
    async fn credential_count(&self) -> usize {
        self.credentials.read().await.len()
    }

    /// Makes subsequent interview appends fail until called again with `false`.
    #[cfg(test)]
    pub fn set_reject_appends(&self, reject: bool) {
        self.reject_appends.store(reject, Ordering::SeqCst);
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn create_account(&self, account: NewAccount) -> Result<UserAccount, StoreError> {
        let email = normalize_email(&account.email);
        let password_hash = spawn_hash_password(account.password).await?;

        let mut accounts = self.accounts.write().await;
        if accounts.values().any(|a| a.account.email == email) {
            return Err(StoreError::DuplicateAccount(email));
        }

        let user = UserAccount {
            id: Uuid::new_v4(),
            name: account.name,
            email,
            role: account.role,
        };
        accounts.insert(
            user.id,
            StoredAccount {
                account: user.clone(),
                password_hash,
            },
        );
        Ok(user)
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<Credential, StoreError> {
        let email = normalize_email(email);
        let (account_id, password_hash) = {
            let accounts = self.accounts.read().await;
            accounts
                .values()
                .find(|a| a.account.email == email)
                .map(|a| (a.account.id, a.password_hash.clone()))
                .ok_or(StoreError::InvalidCredentials)?
        };
        if !spawn_verify_password(password.to_string(), password_hash).await? {
            return Err(StoreError::InvalidCredentials);
        }

        let now = Utc::now();
        let token = Uuid::new_v4();
        let expires_at = now + self.token_ttl;

        let mut credentials = self.credentials.write().await;
        credentials.retain(|_, issued| issued.is_live(now));
        credentials.insert(
            token,
            IssuedCredential {
                account_id,
                expires_at,
            },
        );
        Ok(Credential {
            token,
            account_id,
            expires_at,
        })
    }

    async fn resolve_credential(&self, token: Uuid) -> Result<Option<UserAccount>, StoreError> {
        let Some(issued) = self.credentials.read().await.get(&token).copied() else {
            return Ok(None);
        };
        if !issued.is_live(Utc::now()) {
            self.credentials.write().await.remove(&token);
            return Ok(None);
        }
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&issued.account_id).map(|a| a.account.clone()))
    }

    async fn revoke_credential(&self, token: Uuid) -> Result<(), StoreError> {
        self.credentials.write().await.remove(&token);
        Ok(())
    }

    async fn get_user_role(&self, account_id: Uuid) -> Result<Option<Role>, StoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&account_id).map(|a| a.account.role))
    }

    async fn append_interview_record(
        &self,
        _account_id: Uuid,
        record: &StoredInterviewRecord,
    ) -> Result<Uuid, StoreError> {
        if self.reject_appends.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("appends are rejected".to_string()));
        }
        let id = Uuid::new_v4();
        self.interviews.write().await.push((id, record.clone()));
        Ok(id)
    }

    async fn list_interview_records(
        &self,
    ) -> Result<Vec<(Uuid, StoredInterviewRecord)>, StoreError> {
        Ok(self.interviews.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::models::CandidateProfile;

    fn new_account(email: &str, role: Role) -> NewAccount {
        NewAccount {
            name: "Ada".to_string(),
            email: email.to_string(),
            password: "correct horse".to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn test_signup_login_and_role_lookup() {
        let store = MemoryRecordStore::new();
        let account = store
            .create_account(new_account("Ada@Example.com ", Role::Admin))
            .await
            .unwrap();
        assert_eq!(account.email, "ada@example.com");

        let credential = store
            .authenticate("ada@example.com", "correct horse")
            .await
            .unwrap();
        assert_eq!(credential.account_id, account.id);
        assert_eq!(
            store.get_user_role(account.id).await.unwrap(),
            Some(Role::Admin)
        );

        let resolved = store.resolve_credential(credential.token).await.unwrap();
        assert_eq!(resolved, Some(account));

        store.revoke_credential(credential.token).await.unwrap();
        assert!(store
            .resolve_credential(credential.token)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_expired_credential_resolves_to_none() {
        let store = MemoryRecordStore::new().with_token_ttl(Duration::zero());
        store
            .create_account(new_account("a@b.c", Role::Candidate))
            .await
            .unwrap();

        let credential = store.authenticate("a@b.c", "correct horse").await.unwrap();
        assert!(credential.expires_at <= Utc::now());
        assert!(store
            .resolve_credential(credential.token)
            .await
            .unwrap()
            .is_none());
        assert_eq!(store.credential_count().await, 0);
    }

    #[tokio::test]
    async fn test_login_prunes_expired_credentials() {
        let store = MemoryRecordStore::new().with_token_ttl(Duration::zero());
        store
            .create_account(new_account("a@b.c", Role::Candidate))
            .await
            .unwrap();
        for _ in 0..3 {
            store.authenticate("a@b.c", "correct horse").await.unwrap();
        }
        // Only the credential issued by the latest login is left.
        assert_eq!(store.credential_count().await, 1);
    }

    #[tokio::test]
    async fn test_credential_live_until_expiry() {
        let store = MemoryRecordStore::new().with_token_ttl(Duration::hours(1));
        let account = store
            .create_account(new_account("a@b.c", Role::Candidate))
            .await
            .unwrap();
        let credential = store.authenticate("a@b.c", "correct horse").await.unwrap();
        assert!(credential.expires_at > Utc::now() + Duration::minutes(59));
        assert_eq!(
            store.resolve_credential(credential.token).await.unwrap(),
            Some(account)
        );
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryRecordStore::new();
        store
            .create_account(new_account("a@b.c", Role::Candidate))
            .await
            .unwrap();
        let err = store
            .create_account(new_account("A@B.C", Role::Candidate))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateAccount(_)));
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email() {
        let store = MemoryRecordStore::new();
        store
            .create_account(new_account("a@b.c", Role::Candidate))
            .await
            .unwrap();
        assert!(matches!(
            store.authenticate("a@b.c", "wrong").await,
            Err(StoreError::InvalidCredentials)
        ));
        assert!(matches!(
            store.authenticate("nobody@b.c", "correct horse").await,
            Err(StoreError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_records_listed_in_append_order() {
        let store = MemoryRecordStore::new();
        let record = |name: &str| StoredInterviewRecord {
            candidate_info: CandidateProfile {
                name: name.to_string(),
                ..Default::default()
            },
            questions: vec![],
            responses: vec![],
            feedbacks: vec![],
            scores: vec![],
            timestamp: 0.0,
        };
        let first = store
            .append_interview_record(Uuid::new_v4(), &record("first"))
            .await
            .unwrap();
        store
            .append_interview_record(Uuid::new_v4(), &record("second"))
            .await
            .unwrap();

        let listed = store.list_interview_records().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].0, first);
        assert_eq!(listed[1].1.candidate_info.name, "second");
    }
}
