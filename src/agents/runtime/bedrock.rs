//! Amazon Bedrock Agents runtime

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_bedrockagentruntime::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_bedrockagentruntime::types::ResponseStream;
use aws_sdk_bedrockagentruntime::Client;
use bytes::Bytes;
use futures::stream;
use tracing::debug;

use super::trace::trace_payload;
use super::{AgentEventStream, AgentRuntime};
use crate::agents::error::{InvokeError, InvokeResult};
use crate::config::AgentSettings;
use crate::domain::{AgentEvent, InvokeAgentRequest};

/// Runtime backed by the `bedrock-agent-runtime` service client
#[derive(Clone)]
pub struct BedrockAgentRuntime {
    client: Client,
}

impl BedrockAgentRuntime {
    /// Build a client from the agent settings (region, endpoint) and the default credential chain
    pub async fn new(settings: &AgentSettings) -> Self {
        let sdk_config = Self::build_aws_config(settings).await;
        Self::from_client(Client::new(&sdk_config))
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    async fn build_aws_config(settings: &AgentSettings) -> aws_config::SdkConfig {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(region) = &settings.region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }

        // Custom endpoint, e.g. a VPC endpoint or a local stand-in
        if let Some(endpoint) = &settings.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        debug!(
            "Agent runtime client using region {:?} and default credential chain",
            settings.region
        );

        loader.load().await
    }
}

#[async_trait]
impl AgentRuntime for BedrockAgentRuntime {
    fn name(&self) -> &str {
        "bedrock-agent-runtime"
    }

    async fn invoke_agent(&self, request: InvokeAgentRequest) -> InvokeResult<AgentEventStream> {
        let output = self
            .client
            .invoke_agent()
            .agent_id(request.agent_id)
            .agent_alias_id(request.agent_alias_id)
            .session_id(request.session_id)
            .input_text(request.input_text)
            .set_enable_trace(request.enable_trace)
            .send()
            .await
            .map_err(classify_sdk_error)?;

        let events = stream::unfold(output.completion, |mut receiver| async move {
            match receiver.recv().await {
                Ok(Some(event)) => Some((Ok(convert_event(event)), receiver)),
                Ok(None) => None,
                Err(err) => Some((Err(classify_sdk_error(err)), receiver)),
            }
        });

        Ok(Box::pin(events))
    }
}

/// Code reported for a service error that arrived without one
const UNKNOWN_ERROR_CODE: &str = "Unknown";

/// Errors the service answered with are classified, with or without an error
/// code; everything else (dispatch, timeout, construction) is unexpected.
fn classify_sdk_error<E, R>(err: SdkError<E, R>) -> InvokeError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug,
{
    match err.as_service_error() {
        Some(service_error) => InvokeError::service(
            service_error.code().unwrap_or(UNKNOWN_ERROR_CODE),
            service_error.message().unwrap_or_default(),
        ),
        None => InvokeError::Unexpected(DisplayErrorContext(&err).to_string()),
    }
}

fn convert_event(event: ResponseStream) -> AgentEvent {
    match event {
        ResponseStream::Chunk(part) => AgentEvent::Chunk {
            bytes: part.bytes.map(|blob| Bytes::from(blob.into_inner())),
        },
        ResponseStream::Trace(part) => AgentEvent::Trace(trace_payload(&part)),
        _ => AgentEvent::Other,
    }
}
