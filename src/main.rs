use agent_relay::adapters::health_handler::HealthHandler;
use agent_relay::adapters::request_handler::RequestHandler;
use agent_relay::agents::BedrockAgentRuntime;
use agent_relay::config::Settings;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration once; the handler never reads the environment itself
    let settings = Settings::new()?;
    let host = settings.server.host.clone();
    let port = settings.server.port;

    info!("Starting agent relay on {}:{}", host, port);
    if !settings.agent.is_configured() {
        warn!("AGENT_ID or AGENT_ALIAS_ID is not set; invocations will be rejected");
    }
    if let Some(timeout) = settings.agent.invoke_timeout() {
        info!("Agent invocations time out after {:?}", timeout);
    }

    let runtime = Arc::new(BedrockAgentRuntime::new(&settings.agent).await);
    let handler = Arc::new(RequestHandler::new(settings.agent.clone(), runtime));
    let health_handler = Arc::new(HealthHandler::new(Arc::new(settings.agent.clone())));

    let app = agent_relay::create_app(handler, health_handler);

    // Start server
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
