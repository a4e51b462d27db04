//! Event catalog domain
//!
//! Create, fetch and list ticketed events.
//!
//! ```text
//! HTTP (handlers) ─► EventService ─► dyn EventRepository ─┬─► MongoEventRepository
//!                                                          └─► InMemoryEventRepository
//! ```
//!
//! [`EventCatalogClient`] consumes the HTTP API from other services.

mod client;
mod error;
mod handlers;
mod models;
mod mongodb;
mod repository;
mod service;

pub use client::{CatalogClientError, CatalogClientResult, EventCatalogClient};
pub use error::{EventError, EventResult};
pub use handlers::{ApiDoc, EventsState, events_router, handled_requests};
pub use models::{CreateEvent, Event};
pub use self::mongodb::{DEFAULT_COLLECTION, DEFAULT_PARTITION, MongoEventRepository};
pub use repository::{EventRepository, InMemoryEventRepository};
pub use service::EventService;
