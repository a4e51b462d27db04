use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_or_default, server::ServerConfig};
use database::mongodb::MongoConfig;
use domain_events::{DEFAULT_COLLECTION, DEFAULT_PARTITION};
use std::str::FromStr;

pub use core_config::Environment;

/// Which backend holds the catalog
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    MongoDb,
    Memory,
}

impl FromStr for StoreKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(Self::MongoDb),
            "memory" | "in-memory" => Ok(Self::Memory),
            other => Err(ConfigError::ParseError {
                key: "EVENT_STORE".to_string(),
                details: format!("expected `mongodb` or `memory`, got `{}`", other),
            }),
        }
    }
}

/// Event store settings
///
/// - `EVENT_STORE`: `mongodb` (default) or `memory`
/// - `EVENTS_PARTITION`: partition key for this catalog (default: `events`)
/// - `EVENTS_COLLECTION`: MongoDB collection (default: `events`)
#[derive(Clone, Debug)]
pub struct EventStoreConfig {
    pub kind: StoreKind,
    pub partition: String,
    pub collection: String,
}

impl FromEnv for EventStoreConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            kind: env_or_default("EVENT_STORE", "mongodb").parse()?,
            partition: env_or_default("EVENTS_PARTITION", DEFAULT_PARTITION),
            collection: env_or_default("EVENTS_COLLECTION", DEFAULT_COLLECTION),
        })
    }
}

/// Application configuration composed from the shared config components
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    pub store: EventStoreConfig,
    /// Present only when the store is MongoDB
    pub mongodb: Option<MongoConfig>,
}

impl FromEnv for Config {
    fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let store = EventStoreConfig::from_env()?;

        let mongodb = match store.kind {
            StoreKind::MongoDb => Some(MongoConfig::from_env()?.with_app_name("catalog-api")),
            StoreKind::Memory => None,
        };

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            store,
            mongodb,
        })
    }
}
