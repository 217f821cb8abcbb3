use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::normalize::RawResponse;
use super::{ChatRequest, Provider, ProviderError};

/// A provider for tests and offline demos. Replays canned replies in order
/// and remembers every request it was given.
pub struct ScriptedProvider {
    replies: Vec<Result<RawResponse, ProviderError>>,
    index: AtomicUsize,
    seen: Mutex<Vec<ChatRequest>>,
}

impl ScriptedProvider {
    pub fn new(replies: Vec<Result<RawResponse, ProviderError>>) -> Self {
        Self {
            replies,
            index: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// A single JSON reply, typed if it fits the standard shape.
    pub fn json(body: Value) -> Self {
        Self::new(vec![Ok(RawResponse::from_json(body))])
    }

    pub fn error(err: ProviderError) -> Self {
        Self::new(vec![Err(err)])
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.seen.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    async fn complete(&self, request: &ChatRequest) -> Result<RawResponse, ProviderError> {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(request.clone());
        }
        let i = self.index.fetch_add(1, Ordering::SeqCst);
        self.replies.get(i).cloned().unwrap_or_else(|| {
            Err(ProviderError::transport(
                "ScriptedProviderError",
                format!("no more replies (called {} times)", i + 1),
            ))
        })
    }
}
