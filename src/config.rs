use dotenvy::dotenv;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    /// Interval between heartbeat pings on each connection.
    pub heartbeat_interval: Duration,
}

const DEFAULT_HEARTBEAT_SECS: u64 = 30;

impl Config {
    pub fn from_env() -> Result<Self, crate::error::AppError> {
        dotenv().ok();

        let heartbeat_secs = match env::var("WS_HEARTBEAT_INTERVAL_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                crate::error::AppError::Config(
                    "WS_HEARTBEAT_INTERVAL_SECS must be a positive integer".into(),
                )
            })?,
            Err(_) => DEFAULT_HEARTBEAT_SECS,
        };
        if heartbeat_secs == 0 {
            return Err(crate::error::AppError::Config(
                "WS_HEARTBEAT_INTERVAL_SECS must be non-zero".into(),
            ));
        }

        Ok(Self {
            heartbeat_interval: Duration::from_secs(heartbeat_secs),
        })
    }

    pub fn test_defaults() -> Self {
        Self {
            heartbeat_interval: Duration::from_secs(DEFAULT_HEARTBEAT_SECS),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::test_defaults()
    }
}
