//! Event repository trait and the in-memory backend

use crate::error::{EventError, EventResult};
use crate::models::Event;
use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Storage-agnostic access to the event catalog.
///
/// Backends never generate ids; they store whatever id the [`Event`] carries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Insert the event if its id is unused.
    ///
    /// Fails with [`EventError::Conflict`] when the id already exists; the
    /// stored record is never overwritten.
    async fn save(&self, event: Event) -> EventResult<Event>;

    /// Point lookup. An absent id is `Ok(None)`.
    async fn get_by_id(&self, id: Uuid) -> EventResult<Option<Event>>;

    /// Every stored event, in no particular order.
    async fn get_all(&self) -> EventResult<Vec<Event>>;
}

/// Process-local backend for tests and local development.
#[derive(Clone, Default)]
pub struct InMemoryEventRepository {
    events: Arc<RwLock<HashMap<Uuid, Event>>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn save(&self, event: Event) -> EventResult<Event> {
        let mut events = self.events.write().await;

        match events.entry(event.id) {
            Entry::Occupied(_) => Err(EventError::Conflict(event.id)),
            Entry::Vacant(slot) => {
                slot.insert(event.clone());
                tracing::debug!(event_id = %event.id, "Stored event in memory");
                Ok(event)
            }
        }
    }

    async fn get_by_id(&self, id: Uuid) -> EventResult<Option<Event>> {
        let events = self.events.read().await;
        Ok(events.get(&id).cloned())
    }

    async fn get_all(&self) -> EventResult<Vec<Event>> {
        let events = self.events.read().await;
        Ok(events.values().cloned().collect())
    }
}
