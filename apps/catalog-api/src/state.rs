//! Shared application state.
//!
//! Holds the configuration, the event service over the selected backend
//! and, for the MongoDB backend, the client used for readiness checks and
//! shutdown.

use crate::config::{Config, StoreKind};
use database::RetryConfig;
use database::mongodb::{Client, connect_from_config_with_retry};
use domain_events::{EventRepository, EventService, InMemoryEventRepository, MongoEventRepository};
use eyre::eyre;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub events: Arc<EventService>,
    /// MongoDB client (cloneable, shares the connection pool); `None` for the
    /// in-memory store
    pub mongo_client: Option<Client>,
}

impl AppState {
    /// Connect the configured backend and build the service over it.
    pub async fn initialize(config: Config) -> eyre::Result<Self> {
        let (repository, mongo_client): (Arc<dyn EventRepository>, Option<Client>) =
            match config.store.kind {
                StoreKind::Memory => {
                    info!("Using in-memory event store");
                    (Arc::new(InMemoryEventRepository::new()), None)
                }
                StoreKind::MongoDb => {
                    let mongo = config
                        .mongodb
                        .as_ref()
                        .ok_or_else(|| eyre!("MongoDB store selected without MongoDB config"))?;

                    info!("Connecting to MongoDB at {}", mongo.url());
                    let retry = RetryConfig::new().with_max_retries(5);
                    let client = connect_from_config_with_retry(mongo, Some(retry)).await?;

                    let db = client.database(mongo.database());
                    info!(
                        database = mongo.database(),
                        collection = %config.store.collection,
                        partition = %config.store.partition,
                        "Using MongoDB event store"
                    );

                    let repository = MongoEventRepository::new(
                        &db,
                        &config.store.collection,
                        config.store.partition.clone(),
                    );
                    (Arc::new(repository), Some(client))
                }
            };

        Ok(Self {
            config,
            events: Arc::new(EventService::new(repository)),
            mongo_client,
        })
    }
}
