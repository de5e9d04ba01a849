//! Core trait definitions for durable storage and notification feeds.
//!
//! `hoctap-client` implements these against the filesystem and the backend;
//! the in-memory implementations here back the tests.

use async_trait::async_trait;

use crate::error::ApiResult;
use crate::model::Notification;

// ---------------------------------------------------------------------------
// Durable client storage
// ---------------------------------------------------------------------------

/// Small string key/value store that survives restarts.
///
/// Holds the access token, the refresh token and the last celebrated level.
/// Access is synchronous; there is no locking beyond what an implementation
/// needs internally.
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;

    fn remove(&self, key: &str) -> anyhow::Result<()>;
}

// ---------------------------------------------------------------------------
// Notification feed
// ---------------------------------------------------------------------------

/// Source of the notification list and its read-state mutations.
#[async_trait]
pub trait NotificationFeed: Send + Sync {
    /// Fetch the full current list.
    async fn fetch(&self) -> ApiResult<Vec<Notification>>;

    /// Mark one notification read.
    async fn mark_read(&self, id: &str) -> ApiResult<()>;

    /// Mark every notification read.
    async fn mark_all_read(&self) -> ApiResult<()>;
}
