use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::{Event, EventDraft, EventRepository, RepositoryError};

/// Postgres-backed event repository. Ties on `date_time` fall back to `id`
/// so the order is stable across reads.
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn create(&self, draft: EventDraft) -> Result<Event, RepositoryError> {
        let now = Utc::now();
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events
                (id, title, description, tag, poster_url, tickets_url,
                 date_time, is_published, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(&draft.tag)
        .bind(&draft.poster_url)
        .bind(&draft.tickets_url)
        .bind(draft.date_time)
        .bind(draft.is_published)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    async fn update(&self, id: Uuid, draft: EventDraft) -> Result<Event, RepositoryError> {
        sqlx::query_as::<_, Event>(
            r#"
            UPDATE events SET
                title = $2,
                description = $3,
                tag = $4,
                poster_url = $5,
                tickets_url = $6,
                date_time = $7,
                is_published = $8,
                updated_at = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(&draft.tag)
        .bind(&draft.poster_url)
        .bind(&draft.tickets_url)
        .bind(draft.date_time)
        .bind(draft.is_published)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Event, RepositoryError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn list_all(&self) -> Result<Vec<Event>, RepositoryError> {
        let events =
            sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY date_time ASC, id ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(events)
    }

    async fn list_published(&self) -> Result<Vec<Event>, RepositoryError> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE is_published ORDER BY date_time ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(events)
    }
}
