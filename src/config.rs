//! Service configuration
//!
//! Every setting is a command-line flag with an environment variable
//! fallback. Flags win over the environment.

use std::time::Duration;

use clap::Parser;
use tracing::Level;

use crate::telemetry::LogFormat;

pub const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024;
pub const DEFAULT_CALCULATION_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone, Parser)]
#[command(name = "receipt-points", version, about = "Receipt points service")]
pub struct Config {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Minimum log level, overridden by RUST_LOG when set
    #[arg(long, env = "LOG_LEVEL", default_value_t = Level::INFO)]
    pub log_level: Level,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Largest accepted request body, in bytes
    #[arg(long, env = "MAX_BODY_SIZE", default_value_t = DEFAULT_MAX_BODY_SIZE)]
    pub max_body_size: usize,

    /// Deadline for scoring a single receipt
    #[arg(long, env = "CALCULATION_TIMEOUT_MS", default_value_t = DEFAULT_CALCULATION_TIMEOUT_MS)]
    pub calculation_timeout_ms: u64,

    /// Store scores in Redis instead of memory
    #[arg(long, env = "REDIS_URL")]
    pub redis_url: Option<String>,

    /// How long in-flight requests may drain after a shutdown signal
    #[arg(long, env = "SHUTDOWN_GRACE_MS", default_value_t = 5_000)]
    pub shutdown_grace_ms: u64,

    /// Print a health message and exit
    #[arg(long)]
    pub health_check: bool,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn calculation_timeout(&self) -> Duration {
        Duration::from_millis(self.calculation_timeout_ms)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_are_parsed() {
        let config = Config::try_parse_from([
            "receipt-points",
            "--host",
            "127.0.0.1",
            "--port",
            "9090",
            "--log-level",
            "debug",
            "--log-format",
            "json",
            "--max-body-size",
            "2048",
            "--calculation-timeout-ms",
            "250",
            "--redis-url",
            "redis://localhost:6379",
        ])
        .unwrap();

        assert_eq!(config.bind_addr(), "127.0.0.1:9090");
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.max_body_size, 2048);
        assert_eq!(config.calculation_timeout(), Duration::from_millis(250));
        assert_eq!(config.redis_url.as_deref(), Some("redis://localhost:6379"));
        assert!(!config.health_check);
    }

    #[test]
    fn test_health_check_flag() {
        let config = Config::try_parse_from(["receipt-points", "--health-check"]).unwrap();
        assert!(config.health_check);
    }

    #[test]
    fn test_bad_port_is_rejected() {
        assert!(Config::try_parse_from(["receipt-points", "--port", "http"]).is_err());
    }
}
