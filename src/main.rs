use std::sync::{Arc, Mutex};

use clap::Parser;
use log::{info, warn};

use lexitree::config::{Cli, Config};
use lexitree::{TraceOptions, WordList, logging, server};

#[tokio::main]
async fn main() -> lexitree::Result<()> {
    let config = Config::from_cli(Cli::parse());

    if let Err(error) = logging::init(&config.log_level, config.log_file.as_deref(), config.log_echo) {
        eprintln!("warning: logger already installed: {error}");
    }
    info!("loading and starting the application");

    let mut words = WordList::new();
    if config.trace_ops {
        words.set_trace(TraceOptions {
            adds: true,
            searches: true,
            navigation: true,
        });
    }
    if let Some(path) = &config.words_file {
        match words.load_words(path) {
            Ok(added) => info!("preloaded {added} words from {}", path.display()),
            Err(error) => warn!("{error}"),
        }
    }

    let words = Arc::new(Mutex::new(words));
    server::serve(&config, words).await?;

    info!("unloading the application");
    Ok(())
}
