use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::cli::Cli;

/// Which agent to invoke and how to reach it
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AgentSettings {
    /// Agent identifier. Missing is allowed at startup; requests then fail validation.
    pub agent_id: Option<String>,

    /// Agent alias identifier
    pub agent_alias_id: Option<String>,

    /// AWS region; the SDK default chain decides when unset
    pub region: Option<String>,

    /// Endpoint URL override (VPC endpoint, local stand-in)
    pub endpoint: Option<String>,

    /// Deadline for a whole invocation; unset means wait for the stream to end
    pub invoke_timeout_secs: Option<u64>,
}

impl AgentSettings {
    /// Merge CLI arguments into this config (CLI takes precedence)
    pub fn merge_cli(&mut self, cli: &Cli) {
        if cli.agent_id.is_some() {
            self.agent_id = cli.agent_id.clone();
        }
        if cli.agent_alias_id.is_some() {
            self.agent_alias_id = cli.agent_alias_id.clone();
        }
        if cli.agent_region.is_some() {
            self.region = cli.agent_region.clone();
        }
        if cli.agent_endpoint.is_some() {
            self.endpoint = cli.agent_endpoint.clone();
        }
        if let Some(timeout) = cli.invoke_timeout {
            self.invoke_timeout_secs = Some(timeout);
        }
    }

    /// Validate the agent configuration
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if matches!(&self.region, Some(region) if region.trim().is_empty()) {
            errors.push("Agent region must not be empty when set".to_string());
        }

        if let Some(endpoint) = &self.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                errors.push("Agent endpoint must be an http(s) URL".to_string());
            }
        }

        if self.invoke_timeout_secs == Some(0) {
            errors.push("Invoke timeout must be greater than 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Configured agent id, ignoring empty values
    pub fn agent_id(&self) -> Option<&str> {
        self.agent_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Configured alias id, ignoring empty values
    pub fn agent_alias_id(&self) -> Option<&str> {
        self.agent_alias_id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn invoke_timeout(&self) -> Option<Duration> {
        self.invoke_timeout_secs.map(Duration::from_secs)
    }

    /// Check if an agent is configured well enough to serve requests
    pub fn is_configured(&self) -> bool {
        self.agent_id().is_some() && self.agent_alias_id().is_some()
    }
}
