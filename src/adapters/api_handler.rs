//! HTTP surface for the request handler and the advanced invocation helper

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde_json::Value;
use std::sync::Arc;
use tracing::error;

use crate::adapters::request_handler::RequestHandler;
use crate::domain::{AgentInvocation, ErrorBody, HandlerResponse, InvocationContext};

/// Shared application state for API handlers
#[derive(Clone)]
pub struct ApiState {
    pub handler: Arc<RequestHandler>,
}

/// POST /invoke
///
/// The body is the invocation event; an empty body is treated as `{}`.
pub async fn invoke(State(state): State<ApiState>, body: Bytes) -> Response {
    let event: Value = if body.is_empty() {
        Value::Object(Default::default())
    } else {
        match serde_json::from_slice(&body) {
            Ok(event) => event,
            Err(e) => {
                return envelope_response(HandlerResponse::error(
                    StatusCode::BAD_REQUEST.as_u16(),
                    format!("Invalid JSON body: {}", e),
                ))
            }
        }
    };

    let context = InvocationContext::new();
    envelope_response(state.handler.handle(&event, &context).await)
}

/// POST /agents/invoke
pub async fn invoke_with_context(
    State(state): State<ApiState>,
    Json(invocation): Json<AgentInvocation>,
) -> Response {
    match state.handler.invoker().invoke_with_context(invocation).await {
        Ok(reply) => (StatusCode::OK, Json(reply)).into_response(),
        Err(e) => {
            error!("Advanced invocation failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Map a status envelope onto an HTTP response: the status code carries over,
/// a successful body is plain text and a failed body is JSON.
pub fn envelope_response(envelope: HandlerResponse) -> Response {
    let status =
        StatusCode::from_u16(envelope.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let content_type = if envelope.is_success() {
        "text/plain; charset=utf-8"
    } else {
        "application/json"
    };

    (status, [(header::CONTENT_TYPE, content_type)], envelope.body).into_response()
}
