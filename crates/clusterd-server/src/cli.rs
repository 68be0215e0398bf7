use clap::Parser;
use clusterd_model::ModelFormat;
use std::path::PathBuf;

/// Config file read when `--config` is not given; may be absent
pub const DEFAULT_CONFIG_PATH: &str = "clusterd.yaml";

#[derive(Parser, Debug, Default)]
#[command(name = "clusterd")]
#[command(author, version, about = "Serve cluster assignments from a pre-trained centroid model", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CLUSTERD_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// Model artifact path
    #[arg(short, long, env = "CLUSTERD_MODEL")]
    pub model: Option<PathBuf>,

    /// Model artifact format (auto, json, yaml)
    #[arg(short, long, env = "CLUSTERD_MODEL_FORMAT")]
    pub format: Option<ModelFormat>,

    /// Listen address
    #[arg(short = 'l', long, env = "CLUSTERD_LISTEN")]
    pub listen: Option<String>,

    /// Listen port
    #[arg(short = 'P', long, env = "CLUSTERD_PORT")]
    pub port: Option<u16>,

    /// Debug mode: debug logs and error detail in 500 responses
    #[arg(long, env = "CLUSTERD_DEBUG")]
    pub debug: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
