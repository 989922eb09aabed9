use std::sync::Arc;
use async_trait::async_trait;

use crate::core::state::reference::reference_state::ReferenceState;

#[async_trait]
pub trait ReferenceStateRepositoryTrait: Send + Sync {

    /// Current snapshot. Readers keep it without blocking writers.
    async fn get(&self) -> Arc<ReferenceState>;

    /// Apply `f` under the write lock and publish the result as the new snapshot.
    ///
    /// Whatever `f` returns is handed back, so check-and-swap decisions made
    /// inside `f` are atomic with respect to other writers.
    async fn update<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut ReferenceState) -> T + Send + Sync,
        T: Send;
}
