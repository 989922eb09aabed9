use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One full-set "list" call against the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListRequest {
    /// Path below the API base, e.g. `identity/project/list`
    #[serde(skip)]
    pub endpoint: String,

    /// Fields to project; empty means everything
    pub only: Vec<String>,
}

/// `{ results, total_count }` envelope shared by every list API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub results: Vec<Value>,
    #[serde(default)]
    pub total_count: Option<u64>,
}

impl ListRequest {
    /// Request body: `{"query": {"only": [...]}}`.
    pub fn body(&self) -> Value {
        if self.only.is_empty() {
            serde_json::json!({ "query": {} })
        } else {
            serde_json::json!({ "query": { "only": self.only } })
        }
    }
}

#[async_trait]
pub trait ReferenceListClient: Send + Sync {
    async fn list(&self, request: ListRequest) -> Result<ListResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn body_projects_only_fields() {
        let req = ListRequest {
            endpoint: "identity/project/list".into(),
            only: vec!["project_id".into(), "name".into()],
        };
        assert_eq!(req.body(), json!({ "query": { "only": ["project_id", "name"] } }));
    }

    #[test]
    fn response_tolerates_missing_fields() {
        let resp: ListResponse = serde_json::from_value(json!({})).unwrap();
        assert!(resp.results.is_empty());
        assert_eq!(resp.total_count, None);
    }
}
