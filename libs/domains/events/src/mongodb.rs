//! MongoDB implementation of EventRepository
//!
//! Records are addressed table-style: every document's `_id` is the composite
//! key `{ partition_key, row_key }`, where the row key is the hyphenated event
//! id. All events of one catalog share a partition, so listing is a scan over
//! `_id.partition_key` and a point read is an exact `_id` match.

use crate::error::{EventError, EventResult};
use crate::models::Event;
use crate::repository::EventRepository;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use futures_util::TryStreamExt;
use mongodb::bson::{Bson, Document, doc};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::{Collection, Database};
use tracing::{instrument, warn};
use uuid::Uuid;

pub const DEFAULT_COLLECTION: &str = "events";
pub const DEFAULT_PARTITION: &str = "events";

const DUPLICATE_KEY_CODE: i32 = 11000;

/// MongoDB-backed event repository
#[derive(Clone)]
pub struct MongoEventRepository {
    collection: Collection<Document>,
    partition: String,
}

impl MongoEventRepository {
    pub fn new(database: &Database, collection: &str, partition: impl Into<String>) -> Self {
        Self {
            collection: database.collection(collection),
            partition: partition.into(),
        }
    }

    /// Repository on the default `events` collection and partition
    pub fn with_defaults(database: &Database) -> Self {
        Self::new(database, DEFAULT_COLLECTION, DEFAULT_PARTITION)
    }

    pub fn partition(&self) -> &str {
        &self.partition
    }

    fn key(&self, id: Uuid) -> Document {
        doc! {
            "partition_key": &self.partition,
            "row_key": id.to_string(),
        }
    }

    fn to_document(&self, event: &Event) -> Document {
        doc! {
            "_id": self.key(event.id),
            "name": &event.name,
            "price": event.price,
            "artist": &event.artist,
            "date": event.date.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            "description": &event.description,
            "image_url": &event.image_url,
        }
    }

    fn from_document(&self, document: &Document) -> EventResult<Event> {
        let key = document
            .get_document("_id")
            .map_err(|e| corrupt("<missing key>", e))?;
        let row_key = key.get_str("row_key").map_err(|e| corrupt("<missing row key>", e))?;
        let label = format!("{}/{}", self.partition, row_key);

        let id = Uuid::parse_str(row_key).map_err(|e| corrupt(&label, e))?;

        let price = match document.get("price") {
            Some(Bson::Int32(price)) => *price,
            Some(Bson::Int64(price)) => {
                i32::try_from(*price).map_err(|e| corrupt(&label, format!("price: {}", e)))?
            }
            Some(other) => {
                return Err(corrupt(
                    &label,
                    format!("price has type {:?}", other.element_type()),
                ));
            }
            None => return Err(corrupt(&label, "missing field `price`")),
        };

        let date = document.get_str("date").map_err(|e| corrupt(&label, e))?;
        let date = DateTime::parse_from_rfc3339(date)
            .map_err(|e| corrupt(&label, format!("date: {}", e)))?
            .with_timezone(&Utc);

        Ok(Event {
            id,
            name: text_field(document, "name", &label)?,
            price,
            artist: text_field(document, "artist", &label)?,
            date,
            description: text_field(document, "description", &label)?,
            image_url: text_field(document, "image_url", &label)?,
        })
    }
}

fn text_field(document: &Document, field: &str, label: &str) -> EventResult<String> {
    document
        .get_str(field)
        .map(str::to_owned)
        .map_err(|e| corrupt(label, format!("{}: {}", field, e)))
}

fn corrupt(key: &str, reason: impl ToString) -> EventError {
    EventError::CorruptRecord {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE
    )
}

#[async_trait]
impl EventRepository for MongoEventRepository {
    #[instrument(skip(self, event), fields(event_id = %event.id, partition = %self.partition))]
    async fn save(&self, event: Event) -> EventResult<Event> {
        let document = self.to_document(&event);

        match self.collection.insert_one(document).await {
            Ok(_) => Ok(event),
            Err(e) if is_duplicate_key(&e) => Err(EventError::Conflict(event.id)),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self), fields(partition = %self.partition))]
    async fn get_by_id(&self, id: Uuid) -> EventResult<Option<Event>> {
        let found = self.collection.find_one(doc! { "_id": self.key(id) }).await?;

        found
            .map(|document| self.from_document(&document))
            .transpose()
    }

    #[instrument(skip(self), fields(partition = %self.partition))]
    async fn get_all(&self) -> EventResult<Vec<Event>> {
        let mut cursor = self
            .collection
            .find(doc! { "_id.partition_key": &self.partition })
            .await?;

        let mut events = Vec::new();
        while let Some(document) = cursor.try_next().await? {
            match self.from_document(&document) {
                Ok(event) => events.push(event),
                Err(e) => warn!(error = %e, "Skipping undecodable event record"),
            }
        }

        Ok(events)
    }
}
