//! Server configuration and its command-line surface.

use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_PORT: u16 = 9000;
pub const DEFAULT_BIND: &str = "127.0.0.1";

#[derive(Parser, Debug)]
#[command(name = "lexitree")]
#[command(about = "An anagram dictionary served over a line protocol", long_about = None)]
pub struct Cli {
    /// Word file to preload at startup
    #[arg(value_name = "WORD_FILE")]
    pub words_file: Option<PathBuf>,

    /// Listen port (default: 9000)
    #[arg(long)]
    pub port: Option<u16>,

    /// Bind address (default: 127.0.0.1)
    #[arg(long)]
    pub bind: Option<String>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log file path; stderr only when unset
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Echo log lines to stderr even when a log file is set
    #[arg(long)]
    pub log_echo: bool,

    /// Trace adds, searches and navigation on the catalogue (floods the log)
    #[arg(long)]
    pub trace_ops: bool,
}

/// Resolved runtime configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind: String,
    pub port: u16,
    pub words_file: Option<PathBuf>,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
    pub log_echo: bool,
    pub trace_ops: bool,
    pub prompt: String,
    pub greeting: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            port: DEFAULT_PORT,
            words_file: None,
            log_level: "info".to_string(),
            log_file: None,
            log_echo: false,
            trace_ops: false,
            prompt: "[lexitree]:".to_string(),
            greeting: concat!(
                "LEXITREE\r\n",
                "----------------------------------------------------| Anagram Dictionary |----\r\n",
            )
            .to_string(),
        }
    }
}

impl Config {
    pub fn from_cli(cli: Cli) -> Self {
        let mut config = Self::default();
        if let Some(port) = cli.port {
            config.port = port;
        }
        if let Some(bind) = cli.bind {
            config.bind = bind;
        }
        if let Some(level) = cli.log_level {
            config.log_level = level;
        }
        config.words_file = cli.words_file;
        config.log_file = cli.log_file;
        config.log_echo = cli.log_echo;
        config.trace_ops = cli.trace_ops;
        config
    }
}
