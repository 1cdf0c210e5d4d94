use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::{Event, EventDraft, EventRepository, RepositoryError};

/// In-memory event repository, used when no `DATABASE_URL` is configured
/// and by the test suite. Semantics match the Postgres implementation,
/// including the stable `(date_time, id)` listing order.
#[derive(Default)]
pub struct MemoryEventRepository {
    events: RwLock<HashMap<Uuid, Event>>,
}

impl MemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted(mut events: Vec<Event>) -> Vec<Event> {
        events.sort_by(|a, b| a.date_time.cmp(&b.date_time).then(a.id.cmp(&b.id)));
        events
    }
}

#[async_trait]
impl EventRepository for MemoryEventRepository {
    async fn create(&self, draft: EventDraft) -> Result<Event, RepositoryError> {
        let now = Utc::now();
        let event = Event {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            tag: draft.tag,
            poster_url: draft.poster_url,
            tickets_url: draft.tickets_url,
            date_time: draft.date_time,
            is_published: draft.is_published,
            created_at: now,
            updated_at: now,
        };

        self.events.write().await.insert(event.id, event.clone());
        Ok(event)
    }

    async fn update(&self, id: Uuid, draft: EventDraft) -> Result<Event, RepositoryError> {
        let mut events = self.events.write().await;
        let event = events.get_mut(&id).ok_or(RepositoryError::NotFound)?;

        event.title = draft.title;
        event.description = draft.description;
        event.tag = draft.tag;
        event.poster_url = draft.poster_url;
        event.tickets_url = draft.tickets_url;
        event.date_time = draft.date_time;
        event.is_published = draft.is_published;
        event.updated_at = Utc::now();

        Ok(event.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.events
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Event, RepositoryError> {
        self.events
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn list_all(&self) -> Result<Vec<Event>, RepositoryError> {
        let events = self.events.read().await.values().cloned().collect();
        Ok(Self::sorted(events))
    }

    async fn list_published(&self) -> Result<Vec<Event>, RepositoryError> {
        let events = self
            .events
            .read()
            .await
            .values()
            .filter(|e| e.is_published)
            .cloned()
            .collect();
        Ok(Self::sorted(events))
    }
}
