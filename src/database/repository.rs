use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::database::Event;

/// Validated field set for a create or update. The repository trusts its
/// input; validation is the workflow's responsibility.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub description: Option<String>,
    pub tag: Option<String>,
    pub poster_url: Option<String>,
    pub tickets_url: Option<String>,
    pub date_time: DateTime<Utc>,
    pub is_published: bool,
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("event not found")]
    NotFound,
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Durable store of event records.
///
/// `update` is a full replacement of the editable fields; concurrent updates
/// are last-write-wins (no optimistic concurrency token). Both listings are
/// ordered by `date_time` ascending.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Persist a new event with a fresh id.
    async fn create(&self, draft: EventDraft) -> Result<Event, RepositoryError>;

    /// Replace every editable field of an existing event.
    async fn update(&self, id: Uuid, draft: EventDraft) -> Result<Event, RepositoryError>;

    /// Hard-delete. A retry after success yields `NotFound`, which callers
    /// should read as "already gone".
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Event, RepositoryError>;

    async fn list_all(&self) -> Result<Vec<Event>, RepositoryError>;

    /// Published events only, same ordering as `list_all`.
    async fn list_published(&self) -> Result<Vec<Event>, RepositoryError>;
}
