use clap::Parser;
use std::path::PathBuf;

/// Text-menu shell over the social network user/status store.
#[derive(Parser, Debug)]
#[command(name = "socialnet", version, long_about = None)]
pub struct Cli {
    /// SQLite database file; created on first use
    #[arg(long = "db", env = "SOCIALNET_DB", default_value = "socialnet.sqlite3")]
    pub db: PathBuf,

    /// Use a throwaway in-memory database instead of `--db`
    #[arg(long = "memory")]
    pub memory: bool,

    /// Log level (trace|debug|info|warn|error); defaults by build mode
    #[arg(long = "log-level", env = "SOCIALNET_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Directory for rotated log files; defaults to `./logs`
    #[arg(long = "log-dir", env = "SOCIALNET_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}
