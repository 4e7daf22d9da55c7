//! Command-line configuration of the two server binaries. Every flag falls
//! back to an `INSIGHT_*` environment variable.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser};

pub const DEFAULT_DATA_PATH: &str = "data/cleaned/Cleaned_Data.csv";
pub const DEFAULT_MODEL_PATH: &str = "models/performance_model.json";

/// Bind address shared by both servers.
#[derive(Debug, Clone, Args)]
pub struct ServerArgs {
    /// Bind address
    #[arg(long, env = "INSIGHT_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Bind port
    #[arg(short, long, env = "INSIGHT_PORT")]
    pub port: Option<u16>,
}

impl ServerArgs {
    /// Socket address to bind, using `default_port` when none was given.
    pub fn addr(&self, default_port: u16) -> anyhow::Result<SocketAddr> {
        let port = self.port.unwrap_or(default_port);
        format!("{}:{}", self.host, port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, port))
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "insight-dashboard")]
#[command(about = "Employee performance dashboard")]
#[command(version)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub server: ServerArgs,

    /// Employee dataset (.csv, .json or .parquet), re-read on every request
    #[arg(long, env = "INSIGHT_DATA", default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,
}

impl DashboardArgs {
    pub const DEFAULT_PORT: u16 = 5000;
}

#[derive(Debug, Clone, Parser)]
#[command(name = "insight-predictor")]
#[command(about = "Employee performance score predictor")]
#[command(version)]
pub struct PredictorArgs {
    #[command(flatten)]
    pub server: ServerArgs,

    /// Employee dataset (.csv, .json or .parquet), read once at startup
    #[arg(long, env = "INSIGHT_DATA", default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Linear model artifact (JSON)
    #[arg(long, env = "INSIGHT_MODEL", default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,

    /// Seed for the simulated series; OS entropy when absent
    #[arg(long, env = "INSIGHT_SEED")]
    pub seed: Option<u64>,
}

impl PredictorArgs {
    pub const DEFAULT_PORT: u16 = 5001;
}
