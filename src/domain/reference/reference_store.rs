use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::core::client::reference_client_trait::{ListRequest, ReferenceListClient};
use crate::core::state::reference::reference_item::{ReferenceItem, ReferenceMap};
use crate::core::state::reference::reference_state::ReferenceState;
use crate::core::state::reference::reference_state_manager::ReferenceStateManager;
use crate::core::state::reference::reference_state_repository::ReferenceStateRepository;
use crate::core::state::reference::reference_state_repository_trait::ReferenceStateRepositoryTrait;
use crate::domain::reference::error::ReferenceError;
use crate::domain::reference::mappers::build_reference_map;
use crate::domain::reference::reference_type::ReferenceType;

/// How eager a load should be.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Fetch even if the items are fresh
    pub force: bool,
    /// Skip whenever items exist, however old
    pub lazy: bool,
}

impl LoadOptions {
    pub fn force() -> Self {
        Self { force: true, lazy: false }
    }

    pub fn lazy() -> Self {
        Self { force: false, lazy: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadOutcome {
    Loaded { count: usize, skipped: usize },
    Skipped,
    /// The store was reset while the fetch was in flight; the result was dropped
    Discarded,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReferenceSummary {
    pub reference_type: ReferenceType,
    pub loaded: bool,
    pub count: usize,
    pub last_loaded_at: Option<DateTime<Utc>>,
    pub last_error_at: Option<DateTime<Utc>>,
    pub last_error_message: Option<String>,
}

impl ReferenceSummary {
    fn from_state(reference_type: ReferenceType, state: &ReferenceState) -> Self {
        Self {
            reference_type,
            loaded: state.is_loaded(),
            count: state.len(),
            last_loaded_at: state.last_loaded_at,
            last_error_at: state.last_error_at,
            last_error_message: state.last_error_message.clone(),
        }
    }
}

/// Reference store for one resource type: owns its state and knows how to refill it.
///
/// Concurrent loads are not de-duplicated. Each fetch ends in its own full
/// replacement, so whichever response completes last wins. A fetch that
/// started before a `reset` never installs its result.
pub struct ReferenceStore<R: ReferenceStateRepositoryTrait = ReferenceStateRepository> {
    reference_type: ReferenceType,
    client: Arc<dyn ReferenceListClient>,
    manager: ReferenceStateManager<R>,
    ttl: Duration,
}

impl ReferenceStore<ReferenceStateRepository> {
    pub fn new(
        reference_type: ReferenceType,
        client: Arc<dyn ReferenceListClient>,
        ttl: Duration,
    ) -> Self {
        Self::with_repository(reference_type, client, ReferenceStateRepository::new().shared(), ttl)
    }
}

impl<R: ReferenceStateRepositoryTrait> ReferenceStore<R> {
    pub fn with_repository(
        reference_type: ReferenceType,
        client: Arc<dyn ReferenceListClient>,
        repo: Arc<R>,
        ttl: Duration,
    ) -> Self {
        Self {
            reference_type,
            client,
            manager: ReferenceStateManager::new(repo),
            ttl,
        }
    }

    pub fn reference_type(&self) -> ReferenceType {
        self.reference_type
    }

    /// Total replacement of the items.
    pub async fn set_items(&self, items: ReferenceMap) {
        self.manager.set_items(items).await;
    }

    pub async fn items(&self) -> Option<Arc<ReferenceMap>> {
        self.manager.items().await
    }

    pub async fn get(&self, id: &str) -> Option<ReferenceItem> {
        self.manager.get(id).await
    }

    pub async fn is_loaded(&self) -> bool {
        self.manager.is_loaded().await
    }

    pub async fn is_stale(&self) -> bool {
        !self.manager.is_fresh(self.ttl).await
    }

    /// Back to "never fetched" (session reset).
    pub async fn reset(&self) {
        self.manager.reset().await;
        debug!(reference_type = %self.reference_type, "reference store reset");
    }

    pub async fn summary(&self) -> ReferenceSummary {
        let state = self.manager.snapshot().await;
        ReferenceSummary::from_state(self.reference_type, &state)
    }

    /// Fetch the full set now and replace the items.
    pub async fn load(&self) -> Result<LoadOutcome, ReferenceError> {
        self.load_with(LoadOptions::force()).await
    }

    /// Fetch unless `options` allow the current items to stand.
    pub async fn load_with(&self, options: LoadOptions) -> Result<LoadOutcome, ReferenceError> {
        if !options.force {
            let state = self.manager.snapshot().await;
            if (options.lazy && state.is_loaded()) || state.is_fresh(self.ttl) {
                debug!(reference_type = %self.reference_type, "references still valid, skipping load");
                return Ok(LoadOutcome::Skipped);
            }
        }

        self.fetch().await
    }

    async fn fetch(&self) -> Result<LoadOutcome, ReferenceError> {
        let load_id = Uuid::new_v4();
        let desc = self.reference_type.descriptor();

        let mut only = vec![desc.id_field.to_string(), desc.name_field.to_string()];
        only.extend(desc.extra_fields.iter().map(|f| f.to_string()));

        let request = ListRequest {
            endpoint: desc.endpoint.to_string(),
            only,
        };

        let generation = self.manager.generation().await;
        debug!(%load_id, reference_type = %self.reference_type, "loading references from {}", desc.endpoint);

        match self.client.list(request).await {
            Ok(resp) => {
                let build = build_reference_map(self.reference_type, &resp.results);
                let count = build.items.len();
                let skipped = build.skipped;

                if !self.manager.install_items(generation, build.items).await {
                    debug!(%load_id, reference_type = %self.reference_type, "store was reset during load, dropping result");
                    return Ok(LoadOutcome::Discarded);
                }

                info!(
                    %load_id,
                    reference_type = %self.reference_type,
                    "loaded {} reference(s), skipped {}",
                    count,
                    skipped,
                );
                Ok(LoadOutcome::Loaded { count, skipped })
            }
            Err(e) => {
                let message = format!("{e:#}");
                error!(%load_id, reference_type = %self.reference_type, "reference load failed: {message}");

                self.manager.record_error(generation, message.clone()).await;

                Err(ReferenceError::Fetch {
                    reference_type: self.reference_type,
                    message,
                })
            }
        }
    }
}
