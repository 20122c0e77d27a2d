//! Configuration and CLI argument handling

use std::path::PathBuf;
use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser)]
#[command(name = "tickdown")]
#[command(about = "A keyboard-driven terminal countdown timer")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Initial countdown value in seconds
    #[arg(short, long, default_value = "60")]
    pub count: u64,

    /// Log file path (the UI owns the terminal, so logs go to a file)
    #[arg(long, default_value = "tickdown.log")]
    pub log_file: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
