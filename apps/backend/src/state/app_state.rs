use std::sync::Arc;

use crate::config::server::ServerConfig;
use crate::services::registry::{MatchRegistry, RegistryConfig};
use crate::ws::hub::ConnectionHub;

/// Application state shared by every worker.
#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
    pub hub: Arc<ConnectionHub>,
    pub registry: Arc<MatchRegistry>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let registry_config = RegistryConfig {
            abandon_grace: config.abandon_grace,
            ..RegistryConfig::default()
        };
        Self::with_registry_config(config, registry_config)
    }

    /// Build state with explicit registry settings (fixed deal seed, short grace).
    pub fn with_registry_config(config: ServerConfig, registry_config: RegistryConfig) -> Self {
        let hub = Arc::new(ConnectionHub::new());
        let registry = MatchRegistry::new(registry_config, hub.clone());
        Self {
            config,
            hub,
            registry,
        }
    }
}
