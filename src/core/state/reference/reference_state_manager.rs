use std::sync::Arc;
use chrono::Duration;

use crate::core::state::reference::reference_item::{ReferenceItem, ReferenceMap};
use crate::core::state::reference::reference_state::ReferenceState;
use crate::core::state::reference::reference_state_repository_trait::ReferenceStateRepositoryTrait;

/// Sole writer of one reference state for the lifetime of a session.
pub struct ReferenceStateManager<R: ReferenceStateRepositoryTrait> {
    pub(crate) repo: Arc<R>,
}

impl<R: ReferenceStateRepositoryTrait> ReferenceStateManager<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Replace the items with a full set. No merge with what was there.
    pub async fn set_items(&self, items: ReferenceMap) {
        self.repo.update(|state| state.set_items(items)).await;
    }

    /// Install a loaded map, unless a reset happened after `generation` was read.
    /// Returns whether the items were installed.
    pub async fn install_items(&self, generation: u64, items: ReferenceMap) -> bool {
        self.repo
            .update(|state| state.set_items_for(generation, items))
            .await
    }

    /// Record a failure for a load started at `generation` (items remain intact).
    /// Dropped after a reset.
    pub async fn record_error(&self, generation: u64, message: String) -> bool {
        self.repo
            .update(|state| state.mark_error_for(generation, message))
            .await
    }

    /// Unload and start a new generation.
    pub async fn reset(&self) {
        self.repo.update(|state| state.reset()).await;
    }

    pub async fn generation(&self) -> u64 {
        self.repo.get().await.generation
    }

    pub async fn snapshot(&self) -> Arc<ReferenceState> {
        self.repo.get().await
    }

    /// `None` until the first successful load.
    pub async fn items(&self) -> Option<Arc<ReferenceMap>> {
        self.repo.get().await.items.clone()
    }

    pub async fn get(&self, id: &str) -> Option<ReferenceItem> {
        let state = self.repo.get().await;
        state.items.as_ref().and_then(|m| m.get(id).cloned())
    }

    pub async fn is_loaded(&self) -> bool {
        self.repo.get().await.is_loaded()
    }

    pub async fn is_fresh(&self, ttl: Duration) -> bool {
        self.repo.get().await.is_fresh(ttl)
    }
}
