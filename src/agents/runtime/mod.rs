//! Agent runtime implementations
//!
//! - `bedrock` - Amazon Bedrock Agents (`InvokeAgent`) over the AWS SDK
//! - `in_memory` - scripted event streams for tests and local runs

mod bedrock;
mod in_memory;
mod trace;

pub use bedrock::BedrockAgentRuntime;
pub use in_memory::InMemoryAgentRuntime;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::agents::error::InvokeResult;
use crate::domain::{AgentEvent, InvokeAgentRequest};

/// Lazy, finite, forward-only sequence of response events.
///
/// Items are yielded in delivery order; an `Err` item ends useful consumption.
pub type AgentEventStream = BoxStream<'static, InvokeResult<AgentEvent>>;

/// Capability for starting an agent invocation
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    /// Get the runtime name
    fn name(&self) -> &str;

    /// Issue one `InvokeAgent` call and return its response stream
    async fn invoke_agent(&self, request: InvokeAgentRequest) -> InvokeResult<AgentEventStream>;
}
