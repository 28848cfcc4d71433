use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "domino-deal")]
#[command(about = "Deal a game of dominoes and mail each player their hand")]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "dominoes.toml")]
    pub config: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Keep sending to remaining players after a delivery failure
    #[arg(long)]
    pub continue_on_error: bool,

    /// Shuffle and deal without sending; hand contents are not shown
    #[arg(long)]
    pub dry_run: bool,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}
