//! Admin event workflow: validate a submitted form, optionally store the
//! poster, write through the repository, then signal listing invalidation.

use chrono::{DateTime, NaiveDateTime, Utc};
use std::sync::Arc;
use thiserror::Error;
use url::Url;
use uuid::Uuid;

use crate::assets::{AssetRef, AssetStore, StoreError};
use crate::database::{Event, EventDraft, EventRepository, RepositoryError};
use crate::listing::ListingInvalidations;

/// Raw admin form submission, field names as they appear on the wire.
/// Optional text fields are trimmed to `None` during validation.
#[derive(Debug, Default, Clone)]
pub struct EventForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tag: Option<String>,
    pub poster_url: Option<String>,
    pub tickets_url: Option<String>,
    pub date_time: Option<String>,
    /// Checkbox value; absent means published (the public default).
    pub is_published: Option<String>,
    pub poster_file: Option<PosterUpload>,
}

#[derive(Debug, Clone)]
pub struct PosterUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingRequiredField(&'static str),
    #[error("unparseable date/time: {0}")]
    InvalidDateTime(String),
    #[error("invalid tickets URL: {0}")]
    InvalidTicketsUrl(String),
}

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl EventForm {
    /// Check required fields and normalize the rest. A failure here aborts
    /// the operation before any repository or asset-store call.
    pub fn validate(self) -> Result<(EventDraft, Option<PosterUpload>), ValidationError> {
        let title = self
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(ValidationError::MissingRequiredField("title"))?
            .to_string();

        let raw_date_time = self
            .date_time
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(ValidationError::MissingRequiredField("dateTime"))?;
        let date_time = parse_event_date_time(raw_date_time)?;

        let tickets_url = trim_to_none(self.tickets_url);
        if let Some(raw) = tickets_url.as_deref() {
            Url::parse(raw).map_err(|_| ValidationError::InvalidTicketsUrl(raw.to_string()))?;
        }

        // Checkbox semantics: absent defaults to published.
        let is_published = match self.is_published.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(v) => matches!(v, "on" | "true" | "1"),
        };

        // Zero-length uploads count as "no file attached"
        let poster_file = self.poster_file.filter(|f| !f.bytes.is_empty());

        let draft = EventDraft {
            title,
            description: trim_to_none(self.description),
            tag: trim_to_none(self.tag),
            poster_url: trim_to_none(self.poster_url),
            tickets_url,
            date_time,
            is_published,
        };

        Ok((draft, poster_file))
    }
}

fn trim_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Accepts the HTML `datetime-local` format (with or without seconds) and
/// RFC 3339. Naive values are taken as UTC.
fn parse_event_date_time(raw: &str) -> Result<DateTime<Utc>, ValidationError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }
    Err(ValidationError::InvalidDateTime(raw.to_string()))
}

/// Orchestrates admin create/update/delete over the asset store and the
/// event repository.
///
/// The poster upload and the repository write are not atomic. The chosen
/// policy is compensating cleanup: the poster is stored first, and removed
/// again (best-effort) when the repository write fails, so a persisted
/// event never references a missing asset.
pub struct EventWorkflow {
    repository: Arc<dyn EventRepository>,
    assets: Arc<dyn AssetStore>,
    invalidations: ListingInvalidations,
}

impl EventWorkflow {
    pub fn new(
        repository: Arc<dyn EventRepository>,
        assets: Arc<dyn AssetStore>,
        invalidations: ListingInvalidations,
    ) -> Self {
        Self {
            repository,
            assets,
            invalidations,
        }
    }

    pub async fn create(&self, form: EventForm) -> Result<Event, WorkflowError> {
        let (mut draft, poster_file) = form.validate()?;
        let stored = self.store_poster(poster_file, &mut draft).await?;

        match self.repository.create(draft).await {
            Ok(event) => {
                tracing::info!(event_id = %event.id, "event created");
                self.invalidations.notify_all();
                Ok(event)
            }
            Err(err) => {
                self.discard_poster(stored).await;
                Err(err.into())
            }
        }
    }

    pub async fn update(&self, id: Uuid, form: EventForm) -> Result<Event, WorkflowError> {
        let (mut draft, poster_file) = form.validate()?;
        let stored = self.store_poster(poster_file, &mut draft).await?;

        match self.repository.update(id, draft).await {
            Ok(event) => {
                tracing::info!(event_id = %event.id, "event updated");
                self.invalidations.notify_all();
                Ok(event)
            }
            Err(err) => {
                self.discard_poster(stored).await;
                Err(err.into())
            }
        }
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), WorkflowError> {
        self.repository.delete(id).await?;
        tracing::info!(event_id = %id, "event deleted");
        self.invalidations.notify_all();
        Ok(())
    }

    /// Store the attached poster, if any. The stored path wins over a
    /// manually typed poster URL.
    async fn store_poster(
        &self,
        poster_file: Option<PosterUpload>,
        draft: &mut EventDraft,
    ) -> Result<Option<AssetRef>, StoreError> {
        let Some(upload) = poster_file else {
            return Ok(None);
        };

        let asset = self.assets.store(&upload.bytes, &upload.file_name).await?;
        draft.poster_url = Some(asset.public_path().to_string());
        Ok(Some(asset))
    }

    /// Compensation for a failed repository write after a successful
    /// upload. Best-effort: a failure here only leaves an orphaned file.
    async fn discard_poster(&self, stored: Option<AssetRef>) {
        if let Some(asset) = stored {
            if let Err(err) = self.assets.remove(&asset).await {
                tracing::warn!(
                    asset = asset.public_path(),
                    "failed to remove orphaned poster: {}",
                    err
                );
            }
        }
    }
}
