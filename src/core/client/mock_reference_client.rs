//! Scripted [`ReferenceListClient`] for tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::oneshot;

use crate::core::client::reference_client_trait::{ListRequest, ListResponse, ReferenceListClient};

enum Reply {
    Ready(Result<ListResponse, String>),
    Gated(oneshot::Receiver<Result<ListResponse, String>>),
}

/// Answers `list` calls from a queue of scripted replies, in call order.
/// With the queue empty every call fails.
#[derive(Default)]
pub struct MockReferenceClient {
    replies: Mutex<VecDeque<Reply>>,
    calls: AtomicUsize,
    requests: Mutex<Vec<ListRequest>>,
}

impl MockReferenceClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_results(&self, results: Vec<Value>) {
        let resp = ListResponse {
            total_count: Some(results.len() as u64),
            results,
        };
        self.replies.lock().unwrap().push_back(Reply::Ready(Ok(resp)));
    }

    pub fn push_error(&self, message: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Reply::Ready(Err(message.to_string())));
    }

    /// Queue a reply that only completes once the returned sender fires.
    pub fn push_gated(&self) -> oneshot::Sender<Result<ListResponse, String>> {
        let (tx, rx) = oneshot::channel();
        self.replies.lock().unwrap().push_back(Reply::Gated(rx));
        tx
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<ListRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReferenceListClient for MockReferenceClient {
    async fn list(&self, request: ListRequest) -> Result<ListResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);

        let reply = self.replies.lock().unwrap().pop_front();
        let outcome = match reply {
            Some(Reply::Ready(r)) => r,
            Some(Reply::Gated(rx)) => rx.await.unwrap_or_else(|_| Err("gate dropped".into())),
            None => Err("no scripted reply".into()),
        };

        outcome.map_err(|e| anyhow!(e))
    }
}
