use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error};

use crate::domain::reference::error::ReferenceError;
use crate::domain::reference::reference_registry::ReferenceRegistry;
use crate::domain::reference::reference_type::ReferenceType;

/// Outcome of resolving one raw id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Resolution {
    /// Found; `label` is what to show
    Resolved { id: String, label: String },
    /// Store not loaded yet; a background load was started
    Pending { id: String },
    /// Store loaded but the id is unknown (deleted or out of scope)
    Unresolved { id: String },
}

impl Resolution {
    /// Text to render: the label when resolved, the raw id otherwise.
    pub fn display(&self) -> &str {
        match self {
            Resolution::Resolved { label, .. } => label,
            Resolution::Pending { id } | Resolution::Unresolved { id } => id,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved { .. })
    }
}

/// Receives failures of loads started in the background.
pub trait LoadErrorHandler: Send + Sync {
    fn on_load_error(&self, reference_type: ReferenceType, error: &ReferenceError);
}

impl<F> LoadErrorHandler for F
where
    F: Fn(ReferenceType, &ReferenceError) + Send + Sync,
{
    fn on_load_error(&self, reference_type: ReferenceType, error: &ReferenceError) {
        self(reference_type, error)
    }
}

/// Default handler: log and move on.
pub struct LogLoadErrors;

impl LoadErrorHandler for LogLoadErrors {
    fn on_load_error(&self, reference_type: ReferenceType, error: &ReferenceError) {
        error!(%reference_type, "background reference load failed: {error}");
    }
}

/// Turns raw ids into display labels using the registry.
#[derive(Clone)]
pub struct ReferenceResolver {
    registry: Arc<ReferenceRegistry>,
    on_error: Arc<dyn LoadErrorHandler>,
}

impl ReferenceResolver {
    pub fn new(registry: Arc<ReferenceRegistry>) -> Self {
        Self::with_error_handler(registry, Arc::new(LogLoadErrors))
    }

    pub fn with_error_handler(
        registry: Arc<ReferenceRegistry>,
        on_error: Arc<dyn LoadErrorHandler>,
    ) -> Self {
        Self { registry, on_error }
    }

    pub fn registry(&self) -> &Arc<ReferenceRegistry> {
        &self.registry
    }

    /// Resolve one id. Never waits on the network: an unloaded store gets a
    /// fire-and-forget load and the id is returned as `Pending`.
    pub async fn resolve(
        &self,
        reference_type: ReferenceType,
        id: &str,
    ) -> Result<Resolution, ReferenceError> {
        let store = self.registry.store(reference_type)?;

        let Some(items) = store.items().await else {
            self.spawn_load(reference_type);
            return Ok(Resolution::Pending { id: id.to_string() });
        };

        Ok(match items.get(id) {
            Some(item) => Resolution::Resolved {
                id: id.to_string(),
                label: item.display_label().unwrap_or(id).to_string(),
            },
            None => Resolution::Unresolved { id: id.to_string() },
        })
    }

    /// Resolve a batch against one snapshot; at most one background load is started.
    pub async fn resolve_many<S: AsRef<str>>(
        &self,
        reference_type: ReferenceType,
        ids: &[S],
    ) -> Result<Vec<Resolution>, ReferenceError> {
        let store = self.registry.store(reference_type)?;

        let Some(items) = store.items().await else {
            if !ids.is_empty() {
                self.spawn_load(reference_type);
            }
            return Ok(ids
                .iter()
                .map(|id| Resolution::Pending { id: id.as_ref().to_string() })
                .collect());
        };

        Ok(ids
            .iter()
            .map(|id| {
                let id = id.as_ref();
                match items.get(id) {
                    Some(item) => Resolution::Resolved {
                        id: id.to_string(),
                        label: item.display_label().unwrap_or(id).to_string(),
                    },
                    None => Resolution::Unresolved { id: id.to_string() },
                }
            })
            .collect())
    }

    fn spawn_load(&self, reference_type: ReferenceType) {
        let registry = self.registry.clone();
        let on_error = self.on_error.clone();

        debug!(%reference_type, "reference store unloaded, loading in background");
        tokio::spawn(async move {
            if let Err(e) = registry.load(reference_type).await {
                on_error.on_load_error(reference_type, &e);
            }
        });
    }
}
