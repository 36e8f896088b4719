pub mod bootstrap;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod observability;
pub mod server;

pub use cache::{CacheStatsSnapshot, CachedValue, ListingCache, QueryKey};
pub use catalog::{ListingService, MutationService};
pub use config::{AppConfig, BootstrapConfig, CacheConfig, LoggingConfig, ServerConfig, load_config};
pub use error::ApiError;
pub use observability::init_tracing;
pub use server::{AppState, build_app};
