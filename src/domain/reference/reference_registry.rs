use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Duration;
use futures::future::join_all;
use tracing::info;

use crate::core::client::reference_client_trait::ReferenceListClient;
use crate::core::state::reference::reference_item::ReferenceMap;
use crate::domain::reference::error::ReferenceError;
use crate::domain::reference::reference_store::{LoadOptions, LoadOutcome, ReferenceStore, ReferenceSummary};
use crate::domain::reference::reference_type::ReferenceType;

/// Every per-type reference store under one namespaced access point.
///
/// The registry holds no reference state itself, only the stores.
#[derive(Default)]
pub struct ReferenceRegistry {
    stores: BTreeMap<ReferenceType, Arc<ReferenceStore>>,
}

impl ReferenceRegistry {
    /// Registry with a store for every known type, all sharing one client.
    pub fn new(client: Arc<dyn ReferenceListClient>, ttl: Duration) -> Self {
        let mut registry = Self::default();
        for t in ReferenceType::ALL {
            registry.register(ReferenceStore::new(t, client.clone(), ttl));
        }
        registry
    }

    /// Add (or replace) the store for its type.
    pub fn register(&mut self, store: ReferenceStore) {
        self.stores.insert(store.reference_type(), Arc::new(store));
    }

    pub fn store(&self, reference_type: ReferenceType) -> Result<Arc<ReferenceStore>, ReferenceError> {
        self.stores
            .get(&reference_type)
            .cloned()
            .ok_or(ReferenceError::NotRegistered(reference_type))
    }

    pub fn types(&self) -> impl Iterator<Item = ReferenceType> + '_ {
        self.stores.keys().copied()
    }

    pub async fn items(
        &self,
        reference_type: ReferenceType,
    ) -> Result<Option<Arc<ReferenceMap>>, ReferenceError> {
        Ok(self.store(reference_type)?.items().await)
    }

    pub async fn load(&self, reference_type: ReferenceType) -> Result<LoadOutcome, ReferenceError> {
        self.store(reference_type)?.load().await
    }

    pub async fn load_with(
        &self,
        reference_type: ReferenceType,
        options: LoadOptions,
    ) -> Result<LoadOutcome, ReferenceError> {
        self.store(reference_type)?.load_with(options).await
    }

    /// Load every type concurrently. One failing type does not stop the others.
    pub async fn load_all(
        &self,
        options: LoadOptions,
    ) -> Vec<(ReferenceType, Result<LoadOutcome, ReferenceError>)> {
        let loads = self.stores.iter().map(|(t, store)| async move {
            (*t, store.load_with(options).await)
        });

        join_all(loads).await
    }

    /// Session reset: every store back to "never fetched".
    pub async fn reset_all(&self) {
        join_all(self.stores.values().map(|store| store.reset())).await;
        info!("Reset {} reference store(s)", self.stores.len());
    }

    pub async fn summaries(&self) -> Vec<ReferenceSummary> {
        join_all(self.stores.values().map(|store| store.summary())).await
    }
}
