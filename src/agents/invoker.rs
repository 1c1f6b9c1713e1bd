//! Invocation core shared by the request handler and the advanced helper
//!
//! Both entry points go through [`AgentInvoker::invoke`], which drains the
//! response stream into an [`AgentReply`] or fails with an [`InvokeError`].
//! Each entry point decides on its own how to surface that error.

use futures::StreamExt;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::agents::error::{InvocationFailed, InvokeError, InvokeResult};
use crate::agents::runtime::AgentRuntime;
use crate::agents::session;
use crate::domain::{AgentEvent, AgentInvocation, AgentReply, InvokeAgentRequest};

/// Collects reply text, and optionally trace payloads, from a response stream
#[derive(Debug, Default)]
pub struct ReplyAccumulator {
    text: String,
    trace: Option<Vec<Value>>,
    events: usize,
}

impl ReplyAccumulator {
    pub fn new(collect_trace: bool) -> Self {
        Self {
            text: String::new(),
            trace: collect_trace.then(Vec::new),
            events: 0,
        }
    }

    /// Apply one event. Chunk bytes are decoded on their own, so a chunk must
    /// hold complete UTF-8.
    pub fn push(&mut self, event: AgentEvent) -> InvokeResult<()> {
        self.events += 1;
        match event {
            AgentEvent::Chunk { bytes: Some(bytes) } => {
                let text = std::str::from_utf8(&bytes).map_err(|e| {
                    InvokeError::unexpected(format!("'utf-8' codec can't decode response chunk: {}", e))
                })?;
                self.text.push_str(text);
            }
            AgentEvent::Trace(payload) => {
                if let Some(trace) = self.trace.as_mut() {
                    trace.push(payload);
                }
            }
            AgentEvent::Chunk { bytes: None } | AgentEvent::Other => {}
        }
        Ok(())
    }

    pub fn events_seen(&self) -> usize {
        self.events
    }

    pub fn finish(self, session_id: String) -> AgentReply {
        AgentReply {
            response: self.text,
            session_id,
            trace: self.trace,
        }
    }
}

/// Issues invocations against a runtime, with an optional overall deadline
#[derive(Clone)]
pub struct AgentInvoker {
    runtime: Arc<dyn AgentRuntime>,
    timeout: Option<Duration>,
}

impl AgentInvoker {
    pub fn new(runtime: Arc<dyn AgentRuntime>) -> Self {
        Self {
            runtime,
            timeout: None,
        }
    }

    /// Bound the whole invocation (call plus stream drain). `None` waits indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Invoke the agent and drain its reply. Trace payloads are kept only when
    /// the request enables tracing.
    pub async fn invoke(&self, request: InvokeAgentRequest) -> InvokeResult<AgentReply> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.drain(request))
                .await
                .map_err(|_| InvokeError::Timeout(limit))?,
            None => self.drain(request).await,
        }
    }

    async fn drain(&self, request: InvokeAgentRequest) -> InvokeResult<AgentReply> {
        let session_id = request.session_id.clone();
        let mut reply = ReplyAccumulator::new(request.trace_enabled());

        let mut events = self.runtime.invoke_agent(request).await?;
        while let Some(event) = events.next().await {
            reply.push(event?)?;
        }

        debug!(
            "Drained {} events from {} for session {}",
            reply.events_seen(),
            self.runtime.name(),
            session_id
        );
        Ok(reply.finish(session_id))
    }

    /// Advanced invocation: optional tracing, richer result, and failures
    /// propagated as [`InvocationFailed`] rather than folded into an envelope.
    pub async fn invoke_with_context(
        &self,
        invocation: AgentInvocation,
    ) -> Result<AgentReply, InvocationFailed> {
        let request = InvokeAgentRequest {
            agent_id: invocation.agent_id,
            agent_alias_id: invocation.agent_alias_id,
            session_id: session::resolve_session_id(invocation.session_id),
            input_text: invocation.input_text,
            enable_trace: invocation.enable_trace.then_some(true),
        };

        info!(
            "Invoking agent {} (session {}, trace {})",
            request.agent_id,
            request.session_id,
            request.trace_enabled()
        );

        Ok(self.invoke(request).await?)
    }
}
