use super::request_handler::{RequestHandler, DEFAULT_INPUT_TEXT};
use crate::agents::error::InvokeError;
use crate::agents::runtime::InMemoryAgentRuntime;
use crate::config::AgentSettings;
use crate::domain::{AgentEvent, ErrorBody, InvocationContext};
use serde_json::json;
use std::sync::Arc;

fn settings() -> AgentSettings {
    AgentSettings {
        agent_id: Some("AGENT123".to_string()),
        agent_alias_id: Some("TSTALIASID".to_string()),
        region: Some("us-east-1".to_string()),
        ..Default::default()
    }
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body).unwrap().error
}

#[tokio::test]
async fn test_end_to_end_hi_there() {
    let runtime = Arc::new(InMemoryAgentRuntime::with_events(vec![
        AgentEvent::chunk("Hi "),
        AgentEvent::chunk("there"),
    ]));
    let handler = RequestHandler::new(settings(), runtime.clone());

    let response = handler
        .handle(&json!({"inputText": "Hello", "sessionId": "s1"}), &InvocationContext::new())
        .await;

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, "Hi there");

    let sent = runtime.requests().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].agent_id, "AGENT123");
    assert_eq!(sent[0].agent_alias_id, "TSTALIASID");
    assert_eq!(sent[0].session_id, "s1");
    assert_eq!(sent[0].input_text, "Hello");
    assert_eq!(sent[0].enable_trace, None);
}

#[tokio::test]
async fn test_empty_event_uses_default_prompt() {
    let runtime = Arc::new(InMemoryAgentRuntime::with_events(vec![AgentEvent::chunk("Hello!")]));
    let handler = RequestHandler::new(settings(), runtime.clone());

    let response = handler.handle(&json!({}), &InvocationContext::new()).await;

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, "Hello!");
    let sent = runtime.requests().await;
    assert_eq!(sent[0].input_text, DEFAULT_INPUT_TEXT);
    assert!(uuid::Uuid::parse_str(&sent[0].session_id).is_ok());
}

#[tokio::test]
async fn test_generated_session_ids_differ() {
    let runtime = Arc::new(InMemoryAgentRuntime::with_events(vec![]));
    let handler = RequestHandler::new(settings(), runtime.clone());

    handler.handle(&json!({}), &InvocationContext::new()).await;
    handler.handle(&json!({"sessionId": null}), &InvocationContext::new()).await;

    let sent = runtime.requests().await;
    assert_eq!(sent.len(), 2);
    assert_ne!(sent[0].session_id, sent[1].session_id);
}

#[tokio::test]
async fn test_missing_agent_id_is_400_without_call() {
    let runtime = Arc::new(InMemoryAgentRuntime::with_events(vec![AgentEvent::chunk("x")]));
    let handler = RequestHandler::new(
        AgentSettings {
            agent_id: None,
            ..settings()
        },
        runtime.clone(),
    );

    let response = handler.handle(&json!({"inputText": "Hello"}), &InvocationContext::new()).await;

    assert_eq!(response.status_code, 400);
    assert_eq!(
        error_message(&response.body),
        "Missing required parameters: agentId and inputText"
    );
    assert_eq!(runtime.call_count().await, 0);
}

#[tokio::test]
async fn test_empty_or_null_input_text_is_400_without_call() {
    let runtime = Arc::new(InMemoryAgentRuntime::with_events(vec![AgentEvent::chunk("x")]));
    let handler = RequestHandler::new(settings(), runtime.clone());

    for event in [json!({"inputText": ""}), json!({"inputText": null})] {
        let response = handler.handle(&event, &InvocationContext::new()).await;
        assert_eq!(response.status_code, 400);
    }
    assert_eq!(runtime.call_count().await, 0);
}

#[tokio::test]
async fn test_service_error_envelope() {
    let runtime = Arc::new(InMemoryAgentRuntime::failing(InvokeError::service(
        "AccessDeniedException",
        "User is not authorized",
    )));
    let handler = RequestHandler::new(settings(), runtime);

    let response = handler.handle(&json!({"inputText": "Hello"}), &InvocationContext::new()).await;

    assert_eq!(response.status_code, 500);
    assert_eq!(
        error_message(&response.body),
        "AWS Error (AccessDeniedException): User is not authorized"
    );
}

#[tokio::test]
async fn test_mid_stream_service_error_envelope() {
    let runtime = Arc::new(InMemoryAgentRuntime::with_stream(vec![
        Ok(AgentEvent::chunk("partial")),
        Err(InvokeError::service("ThrottlingException", "Rate exceeded")),
    ]));
    let handler = RequestHandler::new(settings(), runtime);

    let response = handler.handle(&json!({"inputText": "Hello"}), &InvocationContext::new()).await;

    assert_eq!(response.status_code, 500);
    assert_eq!(
        error_message(&response.body),
        "AWS Error (ThrottlingException): Rate exceeded"
    );
}

#[tokio::test]
async fn test_unexpected_error_envelope() {
    let runtime = Arc::new(InMemoryAgentRuntime::failing(InvokeError::unexpected("dispatch failure")));
    let handler = RequestHandler::new(settings(), runtime);

    let response = handler.handle(&json!({"inputText": "Hello"}), &InvocationContext::new()).await;

    assert_eq!(response.status_code, 500);
    assert_eq!(error_message(&response.body), "Unexpected error: dispatch failure");
}

#[tokio::test]
async fn test_malformed_chunk_is_unexpected_error() {
    let runtime = Arc::new(InMemoryAgentRuntime::with_events(vec![AgentEvent::chunk(vec![0xc3u8, 0x28])]));
    let handler = RequestHandler::new(settings(), runtime);

    let response = handler.handle(&json!({}), &InvocationContext::new()).await;

    assert_eq!(response.status_code, 500);
    assert!(error_message(&response.body).starts_with("Unexpected error: "));
}

#[tokio::test]
async fn test_trace_events_are_dropped() {
    let runtime = Arc::new(InMemoryAgentRuntime::with_events(vec![
        AgentEvent::trace(json!({"orchestrationTrace": {}})),
        AgentEvent::chunk("answer"),
    ]));
    let handler = RequestHandler::new(settings(), runtime);

    let response = handler.handle(&json!({}), &InvocationContext::new()).await;

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, "answer");
}

#[tokio::test]
async fn test_non_string_fields_are_unexpected_errors() {
    let runtime = Arc::new(InMemoryAgentRuntime::with_events(vec![]));
    let handler = RequestHandler::new(settings(), runtime.clone());

    let response = handler.handle(&json!({"inputText": 42}), &InvocationContext::new()).await;
    assert_eq!(response.status_code, 500);
    assert!(error_message(&response.body).contains("inputText"));

    let response = handler.handle(&json!(["not", "an", "object"]), &InvocationContext::new()).await;
    assert_eq!(response.status_code, 500);

    assert_eq!(runtime.call_count().await, 0);
}

#[tokio::test]
async fn test_missing_alias_is_unexpected_error() {
    let runtime = Arc::new(InMemoryAgentRuntime::with_events(vec![]));
    let handler = RequestHandler::new(
        AgentSettings {
            agent_alias_id: None,
            ..settings()
        },
        runtime.clone(),
    );

    let response = handler.handle(&json!({}), &InvocationContext::new()).await;

    assert_eq!(response.status_code, 500);
    assert!(error_message(&response.body).contains("agentAliasId"));
    assert_eq!(runtime.call_count().await, 0);
}

#[tokio::test]
async fn test_empty_session_id_gets_fresh_id() {
    let runtime = Arc::new(InMemoryAgentRuntime::with_events(vec![AgentEvent::chunk("ok")]));
    let handler = RequestHandler::new(settings(), runtime.clone());

    let response = handler
        .handle(&json!({"inputText": "Hello", "sessionId": ""}), &InvocationContext::new())
        .await;

    assert_eq!(response.status_code, 200);
    let sent = runtime.requests().await;
    assert_eq!(sent.len(), 1);
    assert!(!sent[0].session_id.is_empty());
    let parsed = uuid::Uuid::parse_str(&sent[0].session_id).unwrap();
    assert_eq!(parsed.get_version_num(), 4);
}
