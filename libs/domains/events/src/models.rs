//! Event catalog models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("name must not be blank".into());
        return Err(error);
    }
    Ok(())
}

/// A ticketed event listed in the catalog.
///
/// Created once from a [`CreateEvent`] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique identifier, assigned at creation
    #[serde(rename = "eventId")]
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Ticket price in whole currency units
    pub price: i32,

    /// Performing artist
    pub artist: String,

    /// When the event takes place
    pub date: DateTime<Utc>,

    pub description: String,

    /// Poster image location
    pub image_url: String,
}

/// Request body for creating an event.
///
/// Only `name` is required. `eventId` is optional; clients that retry a
/// creation may supply the same id so a repeated request is rejected instead
/// of stored twice. An omitted `price` is 0 and an omitted `date` is the Unix
/// epoch.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEvent {
    #[serde(rename = "eventId", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    #[validate(
        length(min = 1, max = 255, message = "name must be 1-255 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,

    #[validate(range(min = 0, message = "price must not be negative"))]
    #[serde(default)]
    pub price: i32,

    #[validate(length(max = 255))]
    #[serde(default)]
    pub artist: String,

    #[serde(default)]
    pub date: DateTime<Utc>,

    #[validate(length(max = 4000))]
    #[serde(default)]
    pub description: String,

    #[validate(length(max = 2048))]
    #[serde(default)]
    pub image_url: String,
}

impl From<CreateEvent> for Event {
    fn from(create: CreateEvent) -> Self {
        Self {
            id: create.id.unwrap_or_else(Uuid::new_v4),
            name: create.name,
            price: create.price,
            artist: create.artist,
            date: create.date,
            description: create.description,
            image_url: create.image_url,
        }
    }
}
