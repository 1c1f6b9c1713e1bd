//! In-memory agent runtime

use async_trait::async_trait;
use futures::stream;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{AgentEventStream, AgentRuntime};
use crate::agents::error::{InvokeError, InvokeResult};
use crate::domain::{AgentEvent, InvokeAgentRequest};

#[derive(Debug, Clone)]
enum Script {
    Stream(Vec<InvokeResult<AgentEvent>>),
    Reject(InvokeError),
}

/// Runtime that replays a fixed script for every call and records each request
pub struct InMemoryAgentRuntime {
    script: Script,
    requests: Arc<RwLock<Vec<InvokeAgentRequest>>>,
}

impl InMemoryAgentRuntime {
    /// Every call streams `events` and then ends
    pub fn with_events(events: Vec<AgentEvent>) -> Self {
        Self::with_stream(events.into_iter().map(Ok).collect())
    }

    /// Every call streams `items`, which may contain mid-stream errors
    pub fn with_stream(items: Vec<InvokeResult<AgentEvent>>) -> Self {
        Self {
            script: Script::Stream(items),
            requests: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Every call fails before any event is produced
    pub fn failing(error: InvokeError) -> Self {
        Self {
            script: Script::Reject(error),
            requests: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Requests received so far, oldest first
    pub async fn requests(&self) -> Vec<InvokeAgentRequest> {
        self.requests.read().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.requests.read().await.len()
    }
}

#[async_trait]
impl AgentRuntime for InMemoryAgentRuntime {
    fn name(&self) -> &str {
        "in-memory"
    }

    async fn invoke_agent(&self, request: InvokeAgentRequest) -> InvokeResult<AgentEventStream> {
        self.requests.write().await.push(request);

        match &self.script {
            Script::Stream(items) => Ok(Box::pin(stream::iter(items.clone()))),
            Script::Reject(error) => Err(error.clone()),
        }
    }
}
