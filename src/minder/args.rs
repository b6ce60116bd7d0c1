use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "minder")]
#[command(about = "Command-line personal assistant for contacts and notes", long_about = None)]
pub struct Cli {
    /// Path to the snapshot file (defaults to the platform data directory)
    #[arg(long)]
    pub store_path: Option<PathBuf>,

    /// Start with an empty store when the snapshot cannot be decoded
    #[arg(long)]
    pub ignore_corrupt: bool,

    /// Log level for the session log file
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Directory for log files (defaults to the snapshot's directory)
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}
