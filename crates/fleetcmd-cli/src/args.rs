use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "fleetcmd",
    version,
    about = "Run a script across a fleet of hosts over the remote execution API"
)]
pub struct Cli {
    /// Hostname pattern used to discover targets
    pub pattern: String,

    /// Script body executed on every matched target
    pub script: String,

    /// Device attribute the pattern matches against
    #[arg(long, default_value = "hostname")]
    pub filter_field: String,

    /// Pre-built filter expression; replaces the pattern-based filter
    #[arg(long)]
    pub raw_filter: Option<String>,

    /// Cap on the number of targets returned by discovery
    #[arg(long, default_value_t = 5000)]
    pub limit: usize,

    /// API base URL (falls back to FLEETCMD_BASE_URL, then the public API)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long)]
    pub insecure: bool,

    /// Maximum number of targets executing at once
    #[arg(long, default_value_t = 32)]
    pub max_concurrent: usize,

    /// Env file holding FLEETCMD_CLIENT_ID / FLEETCMD_CLIENT_SECRET
    #[arg(long, default_value = ".env")]
    pub env_file: PathBuf,

    /// Log format (text|json)
    #[arg(long, default_value = "text")]
    pub log_format: String,

    /// Log level filter
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
