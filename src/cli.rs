use clap::Parser;
use std::path::PathBuf;

/// Agent relay - forwards prompts to a managed agent and relays the streamed reply
#[derive(Parser, Debug, Clone)]
#[command(name = "agent-relay", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "RELAY_CONFIG", default_value = "relay.toml")]
    pub config: PathBuf,

    /// Server host address
    #[arg(long, env = "RELAY_HOST")]
    pub host: Option<String>,

    /// Server port
    #[arg(long, env = "RELAY_PORT")]
    pub port: Option<u16>,

    /// Identifier of the agent to invoke
    #[arg(long, env = "AGENT_ID")]
    pub agent_id: Option<String>,

    /// Alias of the agent to invoke
    #[arg(long, env = "AGENT_ALIAS_ID")]
    pub agent_alias_id: Option<String>,

    /// AWS region the agent is deployed in
    #[arg(long, env = "AGENT_REGION")]
    pub agent_region: Option<String>,

    /// Endpoint URL override for the agent runtime service
    #[arg(long, env = "AGENT_ENDPOINT")]
    pub agent_endpoint: Option<String>,

    /// Deadline in seconds for a whole invocation, including the streamed reply
    #[arg(long, env = "AGENT_INVOKE_TIMEOUT_SECS")]
    pub invoke_timeout: Option<u64>,
}
