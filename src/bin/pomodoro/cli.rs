use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Arguments {
    /// Path to a custom configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Directory where the timer state is saved, overriding the configuration
    #[arg(short, long, conflicts_with = "ephemeral")]
    pub store: Option<PathBuf>,
    /// Keep the timer state in memory only
    #[arg(short, long)]
    pub ephemeral: bool,
    /// Maximum logging level the subscriber should use
    #[arg(short, long, default_value_t = Level::WARN)]
    pub verbosity: Level,
}
