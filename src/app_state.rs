use std::sync::Arc;

use crate::config::AppConfig;
use crate::core::client::reference_client_trait::ReferenceListClient;
use crate::domain::reference::reference_registry::ReferenceRegistry;
use crate::domain::reference::resolver::ReferenceResolver;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub registry: Arc<ReferenceRegistry>,
    pub resolver: ReferenceResolver,
}

pub fn build_app_state(config: AppConfig, client: Arc<dyn ReferenceListClient>) -> AppState {
    let registry = Arc::new(ReferenceRegistry::new(client, config.ttl()));

    AppState {
        config: Arc::new(config),
        resolver: ReferenceResolver::new(registry.clone()),
        registry,
    }
}
