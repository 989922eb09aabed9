use std::sync::Arc;
use tokio::sync::RwLock;

use crate::core::state::reference::reference_state::ReferenceState;
use crate::core::state::reference::reference_state_repository_trait::ReferenceStateRepositoryTrait;

/// In-memory holder of one reference snapshot.
#[derive(Default)]
pub struct ReferenceStateRepository {
    state: RwLock<Arc<ReferenceState>>,
}

impl ReferenceStateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[async_trait::async_trait]
impl ReferenceStateRepositoryTrait for ReferenceStateRepository {
    async fn get(&self) -> Arc<ReferenceState> {
        Arc::clone(&*self.state.read().await)
    }

    async fn update<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut ReferenceState) -> T + Send + Sync,
        T: Send,
    {
        let mut guard = self.state.write().await;

        // Items sit behind their own Arc, so this copy is shallow.
        let mut next = ReferenceState::clone(&guard);
        let out = f(&mut next);
        *guard = Arc::new(next);

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::reference::reference_item::{ReferenceItem, ReferenceMap};

    #[tokio::test]
    async fn snapshot_survives_later_writes() {
        let repo = ReferenceStateRepository::new();

        repo.update(|s| {
            let mut map = ReferenceMap::new();
            map.insert("r-1".into(), ReferenceItem::named("r-1", "Seoul"));
            s.set_items(map);
        })
        .await;

        let before = repo.get().await;
        repo.update(|s| s.reset()).await;
        let after = repo.get().await;

        assert_eq!(before.len(), 1);
        assert!(!after.is_loaded());
    }

    #[tokio::test]
    async fn update_returns_closure_result() {
        let repo = ReferenceStateRepository::new();

        let was_loaded = repo.update(|s| s.is_loaded()).await;
        assert!(!was_loaded);

        let generation = repo.update(|s| {
            s.reset();
            s.generation
        })
        .await;
        assert_eq!(generation, 1);
        assert_eq!(repo.get().await.generation, 1);
    }
}
