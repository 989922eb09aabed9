pub mod tasks;

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::info;

use crate::domain::reference::reference_registry::ReferenceRegistry;

/// Start the periodic stale-reference refresh. `None` when the interval is 0.
pub fn spawn_reference_refresh(
    registry: Arc<ReferenceRegistry>,
    interval_secs: u64,
) -> Option<JoinHandle<()>> {
    if interval_secs == 0 {
        info!("Reference refresh scheduler disabled");
        return None;
    }

    info!("Reference refresh scheduler running every {}s", interval_secs);
    Some(tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
        // First tick completes immediately; skip it so startup loads are not doubled.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            tasks::reference_refresh::refresh_stale_references(&registry).await;
        }
    }))
}
