use std::path::PathBuf;

use clap::{Parser, Subcommand};
use questline_core::Config;

/// Event reward service: condition definitions, user logs, events and
/// reward requests over HTTP.
#[derive(Parser, Debug)]
#[command(name = "questline-server", version, about = "Event reward eligibility service")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server (default)
    Serve {
        /// Bind host, overrides the configured HOST
        #[arg(long)]
        host: Option<String>,

        /// Bind port, overrides the configured PORT
        #[arg(long)]
        port: Option<u16>,
    },

    /// Validate and evaluate a YAML scenario without starting the server
    Check {
        /// Scenario file with `definitions`, `condition` and `logs`
        scenario: PathBuf,
    },
}

/// Apply explicit `serve` flags on top of the profiled config.
pub fn apply_serve_overrides(config: &mut Config, host: Option<String>, port: Option<u16>) {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
}
