use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::AppConfig;
use crate::core::client::reference_client_trait::{ListRequest, ListResponse, ReferenceListClient};

/// Calls the backend list APIs over HTTP (`POST {base_url}/{endpoint}`).
pub struct HttpReferenceClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpReferenceClient {
    pub fn new(client: Client, base_url: impl Into<String>, token: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url, token }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self::new(client, config.api_base_url.clone(), config.api_token.clone()))
    }

    fn url_for(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}

#[async_trait]
impl ReferenceListClient for HttpReferenceClient {
    async fn list(&self, request: ListRequest) -> Result<ListResponse> {
        let url = self.url_for(&request.endpoint);

        let mut req = self.client.post(&url).json(&request.body());
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| anyhow!("Failed to call list API (url={}): {}", url, e))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(anyhow!("List API returned {}: {} (url={})", status, text, url));
        }

        let list: ListResponse = resp
            .json()
            .await
            .map_err(|e| anyhow!("Failed to decode list response: {} (url={})", e, url))?;

        debug!("Listed {} record(s) from {}", list.results.len(), url);
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::{HeaderMap, StatusCode}, routing::post, Json, Router};
    use serde_json::{json, Value};

    async fn spawn_backend(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn posts_projection_and_decodes_results() {
        let router = Router::new().route(
            "/identity/project/list",
            post(|| async {
                Json(json!({
                    "results": [{ "project_id": "p-1", "name": "Alpha" }],
                    "total_count": 1,
                }))
            }),
        );
        let base = spawn_backend(router).await;

        let client = HttpReferenceClient::new(Client::new(), format!("{}/", base), None);
        let resp = client
            .list(ListRequest {
                endpoint: "identity/project/list".into(),
                only: vec!["project_id".into(), "name".into()],
            })
            .await
            .expect("list should succeed");

        assert_eq!(resp.total_count, Some(1));
        assert_eq!(resp.results, vec![json!({ "project_id": "p-1", "name": "Alpha" })]);
    }

    #[tokio::test]
    async fn sends_bearer_token_and_query_body() {
        let router = Router::new().route(
            "/identity/project/list",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                Json(json!({ "results": [{ "auth": auth, "body": body }] }))
            }),
        );
        let base = spawn_backend(router).await;

        let client = HttpReferenceClient::new(Client::new(), base, Some("secret".into()));
        let resp = client
            .list(ListRequest {
                endpoint: "/identity/project/list".into(),
                only: vec!["project_id".into()],
            })
            .await
            .unwrap();

        assert_eq!(
            resp.results[0],
            json!({ "auth": "Bearer secret", "body": { "query": { "only": ["project_id"] } } })
        );
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let router = Router::new().route(
            "/identity/project/list",
            post(|| async { (StatusCode::UNAUTHORIZED, "token expired") }),
        );
        let base = spawn_backend(router).await;

        let client = HttpReferenceClient::new(Client::new(), base, None);
        let err = client
            .list(ListRequest {
                endpoint: "identity/project/list".into(),
                only: vec![],
            })
            .await
            .unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("401"), "unexpected error: {msg}");
        assert!(msg.contains("token expired"), "unexpected error: {msg}");
    }
}
