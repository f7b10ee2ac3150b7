//! CLI argument definitions

use clap::Args;
use std::path::PathBuf;

use crate::report::OutputFormat;

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Target base URL (a base_url in --config takes precedence)
    #[arg(long, default_value = "http://localhost:4321")]
    pub base_url: String,

    /// Optional YAML config providing base_url, headers and cookies
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "10")]
    pub timeout: u64,

    /// Comma-separated scenario names to run
    #[arg(long)]
    pub only: Option<String>,

    /// List scenarios and exit
    #[arg(long)]
    pub list: bool,

    /// Directory containing payload files (default: data/payloads next to the program)
    #[arg(long)]
    pub payload_dir: Option<PathBuf>,

    /// Extra scenarios to append to the built-in catalog (YAML)
    #[arg(long)]
    pub scenarios: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Disable coloured output
    #[arg(long)]
    pub no_color: bool,

    /// Include response body snippets in the detail column
    #[arg(long, short)]
    pub verbose: bool,
}
