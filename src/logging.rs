//! The leveled text log sink.
//!
//! Every structure and the server emit diagnostics through the `log` facade;
//! this module provides the default sink: a logger that writes each line to
//! an append-mode log file, to stderr, or both, flushing per line so tail
//! readers see events immediately. Installing it is optional — diagnostics
//! are observation-only and never affect behavior.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Parses a configured level name; unknown names fall back to `info`.
pub fn parse_level(name: &str) -> LevelFilter {
    match name.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" | "warning" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" | "none" => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

/// Line logger writing to a file and/or stderr.
pub struct LineLogger {
    level: LevelFilter,
    file: Option<Mutex<File>>,
    echo: bool,
}

impl LineLogger {
    fn new(level: LevelFilter, path: Option<&Path>, echo: bool) -> Self {
        let file = path.and_then(|path| match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Some(Mutex::new(file)),
            Err(error) => {
                eprintln!("warning: cannot open log file '{}': {error}", path.display());
                None
            }
        });
        Self { level, file, echo }
    }

    fn format_record(record: &Record) -> String {
        let tag = match record.level() {
            Level::Error => '!',
            Level::Warn => '#',
            Level::Info => '*',
            Level::Debug => '-',
            Level::Trace => '.',
        };
        format!("[{}] {tag} {}\n", clock_stamp(), record.args())
    }
}

impl Log for LineLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = Self::format_record(record);
        if let Some(file) = &self.file
            && let Ok(mut file) = file.lock()
        {
            let _ = file.write_all(line.as_bytes());
            // The writer buffers very little; flush per line so the log file
            // is always current.
            let _ = file.flush();
        }
        if self.echo || self.file.is_none() {
            eprint!("{line}");
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.file
            && let Ok(mut file) = file.lock()
        {
            let _ = file.flush();
        }
    }
}

/// Installs the process-wide logger.
pub fn init(level: &str, path: Option<&Path>, echo: bool) -> Result<(), SetLoggerError> {
    let level = parse_level(level);
    log::set_boxed_logger(Box::new(LineLogger::new(level, path, echo)))?;
    log::set_max_level(level);
    Ok(())
}

/// Wall-clock `HH:MM:SS` (UTC), without pulling in a calendar crate.
fn clock_stamp() -> String {
    let seconds = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("{:02}:{:02}:{:02}", (seconds / 3600) % 24, (seconds / 60) % 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn level_names_parse() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level("WARN"), LevelFilter::Warn);
        assert_eq!(parse_level("warning"), LevelFilter::Warn);
        assert_eq!(parse_level("off"), LevelFilter::Off);
        // Unknown names default to info.
        assert_eq!(parse_level("chatty"), LevelFilter::Info);
    }
}
