use tracing::{debug, info, warn};

use crate::domain::reference::reference_registry::ReferenceRegistry;
use crate::domain::reference::reference_store::{LoadOptions, LoadOutcome};
use crate::domain::reference::reference_type::ReferenceType;

/// Reload every store that is loaded but past its TTL.
///
/// Unloaded stores are left alone: they load on first access.
/// Returns the types that were actually refreshed.
pub async fn refresh_stale_references(registry: &ReferenceRegistry) -> Vec<ReferenceType> {
    let mut refreshed = Vec::new();

    for reference_type in registry.types() {
        let Ok(store) = registry.store(reference_type) else {
            continue;
        };

        if !store.is_loaded().await || !store.is_stale().await {
            continue;
        }

        match store.load_with(LoadOptions::default()).await {
            Ok(LoadOutcome::Loaded { count, .. }) => {
                debug!(%reference_type, "refreshed {} stale reference(s)", count);
                refreshed.push(reference_type);
            }
            Ok(LoadOutcome::Skipped | LoadOutcome::Discarded) => {}
            // Previous items stay in place; the next tick tries again.
            Err(e) => warn!(%reference_type, "stale reference refresh failed: {e}"),
        }
    }

    if !refreshed.is_empty() {
        info!("Refreshed {} stale reference store(s)", refreshed.len());
    }

    refreshed
}
