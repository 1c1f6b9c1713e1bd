//! # agent-relay
//!
//! Forwards a text prompt to a managed conversational agent (Amazon Bedrock
//! Agents) and relays the streamed reply back to the caller.
//!
//! ## Entry points
//!
//! - **Request handler**: untyped event in, `{ statusCode, body }` envelope out.
//!   Never fails; validation problems become 400, everything else 500.
//! - **Advanced helper**: typed invocation with optional tracing that
//!   propagates failures to its caller.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use agent_relay::agents::InMemoryAgentRuntime;
//! use agent_relay::adapters::request_handler::RequestHandler;
//! use agent_relay::config::AgentSettings;
//! use agent_relay::domain::{AgentEvent, InvocationContext};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let runtime = Arc::new(InMemoryAgentRuntime::with_events(vec![AgentEvent::chunk("Hi")]));
//!     let settings = AgentSettings {
//!         agent_id: Some("AGENT123".to_string()),
//!         agent_alias_id: Some("TSTALIASID".to_string()),
//!         ..Default::default()
//!     };
//!     let handler = RequestHandler::new(settings, runtime);
//!     let response = handler
//!         .handle(&serde_json::json!({}), &InvocationContext::new())
//!         .await;
//!     assert_eq!(response.body, "Hi");
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Domain**: request, event, reply and envelope types
//! - **Agents**: runtime port, Bedrock adapter, invocation core
//! - **Adapters**: request handler and HTTP endpoints
//! - **Config**: configuration management

pub mod adapters;
pub mod agents;
pub mod cli;
pub mod config;
pub mod domain;

use crate::adapters::api_handler::{self, ApiState};
use crate::adapters::health_handler::HealthHandler;
use crate::adapters::request_handler::RequestHandler;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Creates the Axum application router with all endpoints configured.
///
/// # Arguments
///
/// * `handler` - Request handler wired to an agent runtime
/// * `health_handler` - Health check handler
///
/// # Returns
///
/// Configured Axum Router
pub fn create_app(handler: Arc<RequestHandler>, health_handler: Arc<HealthHandler>) -> Router {
    let health_router = Router::new()
        .route("/health", get({
            let handler = health_handler.clone();
            move || {
                let h = handler.clone();
                async move { h.health().await }
            }
        }))
        .route("/health/ready", get({
            let handler = health_handler.clone();
            move || {
                let h = handler.clone();
                async move { h.ready().await }
            }
        }))
        .route("/health/live", get({
            let handler = health_handler.clone();
            move || {
                let h = handler.clone();
                async move { h.live().await }
            }
        }));

    let api_state = ApiState { handler };

    let invoke_router = Router::new()
        .route("/invoke", post(api_handler::invoke))
        .route("/agents/invoke", post(api_handler::invoke_with_context))
        .with_state(api_state);

    health_router.merge(invoke_router)
}
