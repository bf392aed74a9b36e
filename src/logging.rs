//! Logging setup for the `zonecache` binary.
//!
//! The library only emits records through the `log` facade; nothing is
//! printed unless a logger is installed. The binary installs `env_logger`
//! writing to stderr, so stdout carries only the fetched content.
//!
//! Level selection, in priority order:
//!
//! 1. `RUST_LOG` environment variable (if set)
//! 2. `--quiet` (errors only)
//! 3. `-v` (debug) or `-vv` (trace)
//! 4. Default: warnings

use env_logger::{Builder, Target};
use log::LevelFilter;
use std::env;

/// Maps CLI verbosity flags to a level filter.
pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Initialize logging for the binary.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(verbose: u8, quiet: bool) {
    let mut builder = Builder::new();
    builder.target(Target::Stderr);

    if env::var_os("RUST_LOG").is_some() {
        builder.parse_default_env();
    } else {
        builder.filter_level(level_for(verbose, quiet));
    }

    let _ = builder.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_default() {
        assert_eq!(level_for(0, false), LevelFilter::Warn);
    }

    #[test]
    fn test_level_for_verbose() {
        assert_eq!(level_for(1, false), LevelFilter::Debug);
        assert_eq!(level_for(2, false), LevelFilter::Trace);
        assert_eq!(level_for(5, false), LevelFilter::Trace);
    }

    #[test]
    fn test_quiet_overrides_verbose() {
        assert_eq!(level_for(0, true), LevelFilter::Error);
        assert_eq!(level_for(2, true), LevelFilter::Error);
    }

    #[test]
    fn test_init_logging_twice_does_not_panic() {
        init_logging(0, false);
        init_logging(1, false);
    }
}
