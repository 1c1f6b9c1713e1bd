//! Primary entry point: untyped event in, status envelope out

use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{info, warn};

use crate::agents::error::{InvokeError, InvokeResult};
use crate::agents::invoker::AgentInvoker;
use crate::agents::runtime::AgentRuntime;
use crate::agents::session;
use crate::config::AgentSettings;
use crate::domain::{HandlerResponse, InvocationContext, InvokeAgentRequest};

/// Prompt sent when the event carries no `inputText`
pub const DEFAULT_INPUT_TEXT: &str = "Hi";

/// Fields named by the validation failure
pub const REQUIRED_PARAMETERS: &str = "agentId and inputText";

pub struct RequestHandler {
    settings: Arc<AgentSettings>,
    invoker: AgentInvoker,
}

impl RequestHandler {
    pub fn new(settings: AgentSettings, runtime: Arc<dyn AgentRuntime>) -> Self {
        let invoker = AgentInvoker::new(runtime).with_timeout(settings.invoke_timeout());
        Self {
            settings: Arc::new(settings),
            invoker,
        }
    }

    /// Invoker sharing this handler's runtime and deadline
    pub fn invoker(&self) -> &AgentInvoker {
        &self.invoker
    }

    /// Handle one invocation event. Never fails: every error becomes a 400/500 envelope.
    pub async fn handle(&self, event: &Value, context: &InvocationContext) -> HandlerResponse {
        match self.process(event, context).await {
            Ok(text) => HandlerResponse::ok(text),
            Err(err) => {
                warn!(
                    "Request {} failed with status {}: {}",
                    context.request_id,
                    err.status_code(),
                    err
                );
                HandlerResponse::error(err.status_code(), err.envelope_message())
            }
        }
    }

    async fn process(&self, event: &Value, context: &InvocationContext) -> InvokeResult<String> {
        let request = self.build_request(event)?;

        info!(
            "Request {} invoking agent {} (session {})",
            context.request_id, request.agent_id, request.session_id
        );

        let reply = self.invoker.invoke(request).await?;
        Ok(reply.response)
    }

    fn build_request(&self, event: &Value) -> InvokeResult<InvokeAgentRequest> {
        let event = event
            .as_object()
            .ok_or_else(|| InvokeError::unexpected("invocation event must be a JSON object"))?;

        let input_text = string_field(event, "inputText")?
            .unwrap_or_else(|| Some(DEFAULT_INPUT_TEXT.to_string()));
        let session_id = string_field(event, "sessionId")?.flatten();

        let agent_id = self.settings.agent_id();
        let (agent_id, input_text) = match (agent_id, input_text.filter(|text| !text.is_empty())) {
            (Some(agent_id), Some(input_text)) => (agent_id.to_string(), input_text),
            _ => return Err(InvokeError::Validation(REQUIRED_PARAMETERS.to_string())),
        };

        let agent_alias_id = self.settings.agent_alias_id().ok_or_else(|| {
            InvokeError::unexpected("Parameter validation failed: missing required parameter agentAliasId")
        })?;

        Ok(InvokeAgentRequest {
            agent_id,
            agent_alias_id: agent_alias_id.to_string(),
            session_id: session::resolve_session_id(session_id),
            input_text,
            enable_trace: None,
        })
    }
}

/// `None` when the key is absent, `Some(None)` when it is null.
fn string_field(event: &Map<String, Value>, key: &str) -> InvokeResult<Option<Option<String>>> {
    match event.get(key) {
        None => Ok(None),
        Some(Value::Null) => Ok(Some(None)),
        Some(Value::String(value)) => Ok(Some(Some(value.clone()))),
        Some(other) => Err(InvokeError::unexpected(format!(
            "Invalid type for parameter {}, value: {}, valid types: string",
            key, other
        ))),
    }
}
