use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    InvalidValue(String),
}

/// Settings for the single round trip to the proxy.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeConfig {
    // Applied separately to connect and to the reply read
    pub timeout: Duration,
    pub reply_buffer_size: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(5000),
            reply_buffer_size: 1024,
        }
    }
}

impl ProbeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidValue("timeout must be greater than zero".to_string()));
        }
        if self.reply_buffer_size == 0 {
            return Err(ConfigError::InvalidValue("reply buffer size must be greater than zero".to_string()));
        }
        Ok(())
    }
}
