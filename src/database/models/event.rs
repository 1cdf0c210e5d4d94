use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A scheduled venue happening. `date_time` is the sole sort key for every
/// listing; `is_published` controls public visibility.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// Short category label, e.g. "Stand-up" or "Karaoke".
    pub tag: Option<String>,
    /// Public path of the poster asset, when one exists.
    pub poster_url: Option<String>,
    /// External ticket purchase link; ticketing itself is delegated.
    pub tickets_url: Option<String>,
    pub date_time: DateTime<Utc>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
