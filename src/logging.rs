//! Logging setup.
//!
//! `LoggingConfig` is built once from the command line and installed once by
//! `main`. Library code only talks to the `log` facade.

use log::LevelFilter;

/// Environment variable that overrides the CLI verbosity
pub const LOG_ENV: &str = "RUST_LOG";

/// Diagnostic logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Level used when `RUST_LOG` is not set
    pub level: LevelFilter,
    /// Filter directives from `RUST_LOG`, if any
    pub directives: Option<String>,
}

impl LoggingConfig {
    /// Build from `-v` count and quiet flag; `RUST_LOG` is read by the caller
    pub fn new(verbosity: u8, quiet: bool, directives: Option<String>) -> Self {
        let level = if quiet {
            LevelFilter::Error
        } else {
            match verbosity {
                0 => LevelFilter::Warn,
                1 => LevelFilter::Debug,
                _ => LevelFilter::Trace,
            }
        };

        Self {
            level,
            directives: directives.filter(|d| !d.trim().is_empty()),
        }
    }

    /// Build from CLI flags and the process environment
    pub fn from_env(verbosity: u8, quiet: bool) -> Self {
        Self::new(verbosity, quiet, std::env::var(LOG_ENV).ok())
    }

    /// Logger builder reflecting this configuration
    pub fn builder(&self) -> env_logger::Builder {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(self.level).format_timestamp(None);
        if let Some(directives) = &self.directives {
            builder.parse_filters(directives);
        }
        builder
    }

    /// Install the logger. Later calls are ignored.
    pub fn install(&self) {
        if self.builder().try_init().is_err() {
            log::debug!("Logger already installed");
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new(0, false, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(LoggingConfig::new(0, false, None).level, LevelFilter::Warn);
        assert_eq!(LoggingConfig::new(1, false, None).level, LevelFilter::Debug);
        assert_eq!(LoggingConfig::new(2, false, None).level, LevelFilter::Trace);
        assert_eq!(LoggingConfig::new(5, false, None).level, LevelFilter::Trace);
    }

    #[test]
    fn test_quiet_wins_over_verbosity() {
        assert_eq!(LoggingConfig::new(3, true, None).level, LevelFilter::Error);
    }

    #[test]
    fn test_blank_directives_are_dropped() {
        assert_eq!(LoggingConfig::new(0, false, Some("  ".to_string())).directives, None);
        assert_eq!(
            LoggingConfig::new(0, false, Some("index_release=debug".to_string())).directives,
            Some("index_release=debug".to_string())
        );
    }
}
