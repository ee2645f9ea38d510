use std::sync::Arc;
use std::time::Duration;

use spdlog::sink::{RotatingFileSink, RotationPolicy, StdStream, StdStreamSink};
use spdlog::{Level, LevelFilter, Logger, LoggerBuilder};

use crate::config::{Config, LogLevel};

impl From<LogLevel> for Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Critical => Level::Critical,
            LogLevel::Error => Level::Error,
            LogLevel::Warn => Level::Warn,
            LogLevel::Info => Level::Info,
            LogLevel::Debug => Level::Debug,
            LogLevel::Trace => Level::Trace,
        }
    }
}

/// Prompts and results go to stdout, so log records only ever go to stderr
fn add_console_sink(builder: &mut LoggerBuilder) -> spdlog::Result<()> {
    let stderr = Arc::new(StdStreamSink::builder()
        .std_stream(StdStream::Stderr)
        .level_filter(LevelFilter::All)
        .build()?);

    builder.sink(stderr);

    Ok(())
}

/// Installs the default logger described by `[log]`.
/// Without a `[log]` section the spdlog console logger stays in place.
pub fn configure_logger(config: &Config) -> spdlog::Result<()> {
    let Some(ref log) = config.log else {
        return Ok(());
    };

    let mut builder = Logger::builder();

    if let Some(ref location) = log.location {
        let daily_sink = Arc::new(RotatingFileSink::builder()
            .base_path(location)
            .rotation_policy(RotationPolicy::Daily { hour: 0, minute: 0 })
            .max_files(60)
            .rotate_on_open(false)
            .build()?);
        builder.sink(daily_sink);
    }

    if log.log_to_console || log.location.is_none() {
        add_console_sink(&mut builder)?;
    }

    let logger = Arc::new(builder.build()?);
    logger.set_flush_level_filter(LevelFilter::MoreSevereEqual(Level::Info));
    logger.set_flush_period(Some(Duration::from_secs(2)));
    logger.set_level_filter(LevelFilter::MoreSevereEqual(log.level.into()));

    spdlog::set_default_logger(logger);

    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::config::Log;

    use super::*;

    #[test]
    fn test_level_mapping() {
        assert_eq!(Level::from(LogLevel::Warn), Level::Warn);
        assert_eq!(Level::from(LogLevel::Trace), Level::Trace);
    }

    #[test]
    fn test_without_log_section() {
        let config = Config::default();
        assert!(config.log.is_none());
        assert!(configure_logger(&config).is_ok());
    }

    #[test]
    fn test_file_sink() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            log: Some(Log {
                level: LogLevel::Debug,
                log_to_console: false,
                location: Some(dir.path().join("postpub.log")),
            }),
            ..Default::default()
        };
        assert!(configure_logger(&config).is_ok());
    }
}
