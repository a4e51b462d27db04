//! Event service layer

use crate::error::{EventError, EventResult};
use crate::models::{CreateEvent, Event};
use crate::repository::EventRepository;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

/// Validates requests, maps them to events and delegates to the repository.
///
/// Absent events become [`EventError::NotFound`] here; the repository itself
/// reports them as `None`.
#[derive(Clone)]
pub struct EventService {
    repository: Arc<dyn EventRepository>,
}

impl EventService {
    pub fn new(repository: Arc<dyn EventRepository>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self, create), fields(event_name = %create.name))]
    pub async fn create(&self, create: CreateEvent) -> EventResult<Event> {
        create.validate()?;

        let event: Event = create.into();
        let event = self.repository.save(event).await?;

        info!(event_id = %event.id, "Event created");
        Ok(event)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> EventResult<Event> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(EventError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> EventResult<Vec<Event>> {
        self.repository.get_all().await
    }
}
