use log::LevelFilter;
use simplelog::{ColorChoice, TermLogger, TerminalMode};

use crate::error::Error;

/// Maps the number of `-v` flags to a log level. Warnings are always shown.
pub fn level_for_verbosity(occurrences: u64) -> LevelFilter {
    match occurrences {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Sends log output to stderr, leaving stdout for the status lines.
pub fn setup_logging(max_level: LevelFilter) -> Result<(), Error> {
    TermLogger::init(
        max_level,
        Default::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;
    Ok(())
}
