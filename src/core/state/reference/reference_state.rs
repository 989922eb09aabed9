use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::core::state::reference::reference_item::ReferenceMap;

/// In-memory reference snapshot for one resource type.
///
/// This state:
/// - lives only in memory (NOT persisted)
/// - is replaced wholesale on every successful load
/// - distinguishes "never fetched" (`items == None`) from "fetched, empty"
/// - counts session resets in `generation`; a load started under an older
///   generation must not install its items
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceState {
    pub items: Option<Arc<ReferenceMap>>,

    // ===== Timestamps =====
    pub last_loaded_at: Option<DateTime<Utc>>,
    pub last_error_at: Option<DateTime<Utc>>,

    pub last_error_message: Option<String>,

    /// Bumped by every `reset`
    pub generation: u64,
}

impl ReferenceState {
    /// Fully replace the items with a freshly fetched map.
    pub fn set_items(&mut self, items: ReferenceMap) {
        self.items = Some(Arc::new(items));
        self.last_loaded_at = Some(Utc::now());
        self.last_error_at = None;
        self.last_error_message = None;
    }

    /// Record a failed load without touching the items.
    pub fn mark_error(&mut self, msg: String) {
        self.last_error_message = Some(msg);
        self.last_error_at = Some(Utc::now());
    }

    /// Install `items` only if no reset happened since `generation` was read.
    pub fn set_items_for(&mut self, generation: u64, items: ReferenceMap) -> bool {
        if generation != self.generation {
            return false;
        }
        self.set_items(items);
        true
    }

    /// Same generation rule as `set_items_for`.
    pub fn mark_error_for(&mut self, generation: u64, msg: String) -> bool {
        if generation != self.generation {
            return false;
        }
        self.mark_error(msg);
        true
    }

    /// Back to "never fetched", in a new generation.
    pub fn reset(&mut self) {
        *self = Self {
            generation: self.generation + 1,
            ..Self::default()
        };
    }

    pub fn is_loaded(&self) -> bool {
        self.items.is_some()
    }

    /// Loaded, and the last load is younger than `ttl`.
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        match (&self.items, self.last_loaded_at) {
            (Some(_), Some(ts)) => Utc::now() - ts < ttl,
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.items.as_ref().map(|m| m.len()).unwrap_or(0)
    }
}
