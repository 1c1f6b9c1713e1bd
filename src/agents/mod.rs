//! Agent invocation for agent-relay
//!
//! ## Architecture
//!
//! - `runtime/` - `AgentRuntime` port with the Bedrock and in-memory implementations
//! - `invoker` - drains a response stream into a reply (shared core)
//! - `session` - session identifier defaults
//! - `error` - invocation error taxonomy

pub mod error;
pub mod invoker;
pub mod runtime;
pub mod session;

// Re-export commonly used types
pub use error::*;
pub use invoker::{AgentInvoker, ReplyAccumulator};
pub use runtime::{AgentEventStream, AgentRuntime, BedrockAgentRuntime, InMemoryAgentRuntime};
