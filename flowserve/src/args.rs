use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Flowserve gateway
#[derive(Debug, Parser)]
#[command(name = "flowserve", about = "OpenAI-compatible chat completion gateway for workflows")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "flowserve.toml", env = "FLOWSERVE_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "FLOWSERVE_LISTEN")]
    pub listen: Option<SocketAddr>,
}
