use std::path::PathBuf;

use clap::Parser;
use simplelog::LevelFilter;

/// Replay an interaction script against a care page.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Page description (element tree, controller kind, config) as JSON
    #[arg(short, long)]
    pub page: PathBuf,
    /// Interaction script; read from stdin when omitted
    #[arg(short, long)]
    pub script: Option<PathBuf>,
    /// Backend root for the async commands, e.g. http://localhost:5000
    #[arg(short, long)]
    pub base_url: Option<String>,
    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,
    #[arg(long, default_value = "carepage-cli.log")]
    pub log_file: PathBuf,
    #[arg(long, default_value = "debug", value_parser = parse_level)]
    pub log_level: LevelFilter,
}

fn parse_level(raw: &str) -> Result<LevelFilter, String> {
    raw.parse()
        .map_err(|_| format!("unknown log level `{raw}`"))
}
