//! Stderr logger.
//!
//! Implements the `log::Log` trait so diagnostics from every module go through
//! the `log` facade. Progress output meant for the user stays on stdout.

use anyhow::{anyhow, Result};
use log::{LevelFilter, Metadata, Record};

static LOGGER: StderrLogger = StderrLogger;

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level().as_str().to_lowercase(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Maps the `-v` count to a level filter. Warnings are always shown.
pub fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the logger for the rest of the process.
pub fn init(verbose: u8) -> Result<()> {
    log::set_logger(&LOGGER).map_err(|_| anyhow!("logger already initialized"))?;
    log::set_max_level(level_for(verbose));
    Ok(())
}
