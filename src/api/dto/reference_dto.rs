//! Reference API DTOs

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::core::state::reference::reference_item::ReferenceMap;
use crate::domain::reference::error::ReferenceError;
use crate::domain::reference::reference_store::{LoadOptions, LoadOutcome};
use crate::domain::reference::reference_type::ReferenceType;

#[derive(Deserialize, Debug, Default, Clone, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_load_request"))]
pub struct LoadRequest {
    pub force: bool,
    pub lazy: bool,
}

fn validate_load_request(req: &LoadRequest) -> Result<(), ValidationError> {
    if req.force && req.lazy {
        return Err(ValidationError::new("force_and_lazy"));
    }
    Ok(())
}

impl From<LoadRequest> for LoadOptions {
    fn from(req: LoadRequest) -> Self {
        LoadOptions {
            force: req.force,
            lazy: req.lazy,
        }
    }
}

#[derive(Deserialize, Debug, Validate)]
pub struct ResolveQuery {
    /// Comma-separated ids
    #[validate(length(min = 1))]
    pub ids: String,
}

impl ResolveQuery {
    pub fn id_list(&self) -> Vec<&str> {
        self.ids
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[derive(Serialize, Debug)]
pub struct ReferenceItemsResponse {
    pub reference_type: ReferenceType,
    /// `null` until the store has been loaded
    pub items: Option<Arc<ReferenceMap>>,
}

#[derive(Serialize, Debug)]
pub struct LoadResult {
    pub reference_type: ReferenceType,
    pub outcome: Option<LoadOutcome>,
    pub error: Option<String>,
}

impl LoadResult {
    pub fn from_result(reference_type: ReferenceType, result: Result<LoadOutcome, ReferenceError>) -> Self {
        match result {
            Ok(outcome) => Self { reference_type, outcome: Some(outcome), error: None },
            Err(e) => Self { reference_type, outcome: None, error: Some(e.to_string()) },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn force_and_lazy_together_are_invalid() {
        let req = LoadRequest { force: true, lazy: true };
        assert!(req.validate().is_err());
        assert!(LoadRequest { force: true, lazy: false }.validate().is_ok());
    }

    #[test]
    fn id_list_drops_blanks() {
        let q = ResolveQuery { ids: "p-1, ,p-2,".into() };
        assert_eq!(q.id_list(), vec!["p-1", "p-2"]);
    }

    #[test]
    fn load_result_carries_outcome_or_error() {
        let ok = LoadResult::from_result(
            ReferenceType::Project,
            Ok(LoadOutcome::Loaded { count: 2, skipped: 1 }),
        );
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({
                "reference_type": "project",
                "outcome": { "status": "loaded", "count": 2, "skipped": 1 },
                "error": null
            })
        );

        let failed = LoadResult::from_result(
            ReferenceType::Region,
            Err(ReferenceError::Fetch {
                reference_type: ReferenceType::Region,
                message: "timeout".into(),
            }),
        );
        assert!(failed.outcome.is_none());
        assert_eq!(failed.error.as_deref(), Some("failed to load region references: timeout"));
    }
}
