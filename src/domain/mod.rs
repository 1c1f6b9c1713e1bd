use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Parameters of a single `InvokeAgent` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvokeAgentRequest {
    pub agent_id: String,
    pub agent_alias_id: String,
    pub session_id: String,
    pub input_text: String,
    /// Left off the outgoing call entirely unless tracing was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_trace: Option<bool>,
}

impl InvokeAgentRequest {
    pub fn trace_enabled(&self) -> bool {
        self.enable_trace.unwrap_or(false)
    }
}

/// One element of the agent's response stream, in delivery order.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentEvent {
    /// Fragment of the reply text. The service may send a chunk without bytes.
    Chunk { bytes: Option<Bytes> },
    /// Opaque diagnostic payload describing the agent's reasoning.
    Trace(Value),
    /// Any other event kind (return-control, files, ...). Never inspected.
    Other,
}

impl AgentEvent {
    pub fn chunk(bytes: impl Into<Bytes>) -> Self {
        AgentEvent::Chunk {
            bytes: Some(bytes.into()),
        }
    }

    pub fn trace(payload: Value) -> Self {
        AgentEvent::Trace(payload)
    }
}

/// Fully drained reply of one invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentReply {
    pub response: String,
    pub session_id: String,
    /// Present only when tracing was requested, even if no trace events arrived.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<Vec<Value>>,
}

/// Input of the advanced invocation helper
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentInvocation {
    pub agent_id: String,
    pub agent_alias_id: String,
    pub input_text: String,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub enable_trace: bool,
}

impl AgentInvocation {
    pub fn new(
        agent_id: impl Into<String>,
        agent_alias_id: impl Into<String>,
        input_text: impl Into<String>,
    ) -> Self {
        Self {
            agent_id: agent_id.into(),
            agent_alias_id: agent_alias_id.into(),
            input_text: input_text.into(),
            session_id: None,
            enable_trace: false,
        }
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_trace(mut self, enable_trace: bool) -> Self {
        self.enable_trace = enable_trace;
        self
    }
}

/// Status envelope returned by the request handler.
///
/// On success `body` is the raw reply text; on failure it is a JSON encoded
/// [`ErrorBody`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status_code: u16,
    pub body: String,
}

impl HandlerResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            body: body.into(),
        }
    }

    pub fn error(status_code: u16, message: impl Into<String>) -> Self {
        let body = ErrorBody {
            error: message.into(),
        };
        Self {
            status_code,
            // A struct with one string field always serializes.
            body: serde_json::to_string(&body).unwrap_or_default(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Calling-convention context handed to the request handler alongside the event.
/// Only used to correlate log lines.
#[derive(Debug, Clone)]
pub struct InvocationContext {
    pub request_id: String,
}

impl InvocationContext {
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
        }
    }
}

impl Default for InvocationContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_omits_trace_flag_when_unset() {
        let request = InvokeAgentRequest {
            agent_id: "A1".to_string(),
            agent_alias_id: "ALIAS".to_string(),
            session_id: "s1".to_string(),
            input_text: "Hello".to_string(),
            enable_trace: None,
        };
        let payload = serde_json::to_value(&request).unwrap();
        assert_eq!(payload["agentId"], "A1");
        assert_eq!(payload["inputText"], "Hello");
        assert!(payload.get("enableTrace").is_none());
        assert!(!request.trace_enabled());
    }

    #[test]
    fn test_reply_without_trace_has_no_trace_field() {
        let reply = AgentReply {
            response: "Hi".to_string(),
            session_id: "s1".to_string(),
            trace: None,
        };
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json, serde_json::json!({"response": "Hi", "sessionId": "s1"}));
    }

    #[test]
    fn test_error_envelope_body_is_json() {
        let response = HandlerResponse::error(500, "Unexpected error: boom");
        assert_eq!(response.status_code, 500);
        assert!(!response.is_success());
        let body: ErrorBody = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body.error, "Unexpected error: boom");
    }

    #[test]
    fn test_invocation_deserializes_with_defaults() {
        let invocation: AgentInvocation = serde_json::from_value(serde_json::json!({
            "agentId": "A1",
            "agentAliasId": "ALIAS",
            "inputText": "Hello"
        }))
        .unwrap();
        assert_eq!(invocation, AgentInvocation::new("A1", "ALIAS", "Hello"));
    }
}
