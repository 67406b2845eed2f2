//! Flat-file store: the memory tables plus a JSON snapshot on disk.
use super::memory::{MemoryStore, Snapshot};
use super::{CredentialStore, GroupStore, TokenStore};
use crate::error::AppError;
use crate::models::{ApiToken, Group, User};
use accounts_common::Id;
use async_trait::async_trait;
use std::{
    fs,
    future::Future,
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::{fs as tokio_fs, sync::Mutex};

/// Snapshot file name inside the data directory
pub const SNAPSHOT_FILE: &str = "accounts.json";

/// Store that survives restarts by rewriting `accounts.json` after every
/// mutation. Reads are served from memory.
///
/// A mutation is applied to a staged copy of the tables first. Memory only
/// changes once that copy is on disk, so a failed write leaves the store
/// exactly as it was.
#[derive(Clone)]
pub struct FlatFileStorage {
    inner: MemoryStore,
    root: PathBuf,
    /// Serializes stage-persist-swap so snapshots land in order
    write_lock: Arc<Mutex<()>>,
}

impl FlatFileStorage {
    /// Open (or create) a data directory and load any existing snapshot
    pub fn new<P: AsRef<Path>>(root: P) -> anyhow::Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;

        let path = root.join(SNAPSHOT_FILE);
        let inner = if path.exists() {
            let content = fs::read_to_string(&path)?;
            let snapshot: Snapshot = serde_json::from_str(&content)?;
            tracing::info!(
                path = %path.display(),
                users = snapshot.users.len(),
                tokens = snapshot.tokens.len(),
                "loaded store snapshot"
            );
            MemoryStore::from_snapshot(snapshot)?
        } else {
            MemoryStore::new()
        };

        Ok(Self {
            inner,
            root,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Run `op` against a staged copy, persist the copy, then swap it in
    async fn commit<T, F, Fut>(&self, op: F) -> Result<T, AppError>
    where
        F: FnOnce(MemoryStore) -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        let _guard = self.write_lock.lock().await;
        let staged = MemoryStore::from_snapshot(self.inner.snapshot().await)?;

        let out = op(staged.clone()).await?;
        self.persist(&staged.snapshot().await).await?;
        self.inner.replace_with(staged).await;
        Ok(out)
    }

    /// Write a snapshot to a temp file, then rename over the live one
    async fn persist(&self, snapshot: &Snapshot) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(snapshot)?;
        let tmp = self.root.join(format!("{SNAPSHOT_FILE}.tmp"));
        tokio_fs::write(&tmp, json).await?;
        tokio_fs::rename(&tmp, self.root.join(SNAPSHOT_FILE)).await?;
        tracing::debug!(root = %self.root.display(), "store snapshot written");
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for FlatFileStorage {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.inner.find_user_by_email(email).await
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        self.inner.find_user_by_username(username).await
    }

    async fn find_user_by_id(&self, id: Id) -> Result<User, AppError> {
        self.inner.find_user_by_id(id).await
    }

    async fn insert_user(&self, user: User) -> Result<User, AppError> {
        self.commit(|staged| async move { staged.insert_user(user).await })
            .await
    }

    async fn update_user(&self, user: User) -> Result<User, AppError> {
        self.commit(|staged| async move { staged.update_user(user).await })
            .await
    }
}

#[async_trait]
impl TokenStore for FlatFileStorage {
    async fn insert_token(&self, token: ApiToken) -> Result<(), AppError> {
        self.commit(|staged| async move { staged.insert_token(token).await })
            .await
    }

    async fn find_token_by_digest(&self, digest: &str) -> Result<Option<ApiToken>, AppError> {
        self.inner.find_token_by_digest(digest).await
    }

    async fn delete_token_by_digest(&self, digest: &str) -> Result<bool, AppError> {
        if self.inner.find_token_by_digest(digest).await?.is_none() {
            return Ok(false);
        }
        let digest = digest.to_string();
        self.commit(|staged| async move { staged.delete_token_by_digest(&digest).await })
            .await
    }

    async fn delete_tokens_for_user(&self, user_id: Id) -> Result<usize, AppError> {
        self.commit(|staged| async move { staged.delete_tokens_for_user(user_id).await })
            .await
    }
}

#[async_trait]
impl GroupStore for FlatFileStorage {
    async fn insert_group(&self, group: Group) -> Result<Group, AppError> {
        self.commit(|staged| async move { staged.insert_group(group).await })
            .await
    }

    async fn find_group_by_id(&self, id: Id) -> Result<Group, AppError> {
        self.inner.find_group_by_id(id).await
    }
}
