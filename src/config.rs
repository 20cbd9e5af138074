use config::{Config, ConfigError};
use serde::Deserialize;
use std::fmt;

use crate::exchange::binance::BINANCE_API_URL;
use crate::exchange::ExchangeError;

// Environment variable names for exchange credentials
pub const API_KEY_ENV: &str = "api_key";
pub const API_SECRET_ENV: &str = "api_secret";

#[derive(Debug, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct ExchangeSettings {
    pub api_url: String,
    pub timeout_secs: u64,
    pub recv_window: u64,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub exchange: ExchangeSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000_i64)?
            .set_default("exchange.api_url", BINANCE_API_URL)?
            .set_default("exchange.timeout_secs", 30_i64)?
            .set_default("exchange.recv_window", 5000_i64)?;

        if let Ok(host) = std::env::var("SERVER_HOST") {
            builder = builder.set_override("server.host", host)?;
        }
        if let Ok(port) = std::env::var("SERVER_PORT") {
            builder = builder.set_override("server.port", port)?;
        }
        if let Ok(api_url) = std::env::var("BINANCE_API_URL") {
            builder = builder.set_override("exchange.api_url", api_url)?;
        }

        builder.build()?.try_deserialize()
    }
}

/// Exchange API credentials, read from the environment once per invocation.
/// Never serialized, never persisted.
#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self, ExchangeError> {
        let api_key =
            std::env::var(API_KEY_ENV).map_err(|_| ExchangeError::MissingCredential(API_KEY_ENV))?;
        let api_secret = std::env::var(API_SECRET_ENV)
            .map_err(|_| ExchangeError::MissingCredential(API_SECRET_ENV))?;

        Ok(Self {
            api_key,
            api_secret,
        })
    }
}

// Masks both values so a stray debug log cannot leak them
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let masked_key = if self.api_key.len() > 8 {
            format!(
                "{}...{}",
                &self.api_key[..4],
                &self.api_key[self.api_key.len() - 4..]
            )
        } else {
            "***REDACTED***".to_string()
        };

        f.debug_struct("Credentials")
            .field("api_key", &masked_key)
            .field("api_secret", &"***REDACTED***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::new().unwrap();

        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.exchange.api_url, "https://api.binance.com");
        assert_eq!(settings.exchange.timeout_secs, 30);
        assert_eq!(settings.exchange.recv_window, 5000);
    }

    #[test]
    fn test_credentials_from_env() {
        // Set-then-remove inside one test so parallel tests never observe a
        // half-configured environment.
        std::env::set_var(API_KEY_ENV, "test-key");
        std::env::set_var(API_SECRET_ENV, "test-secret");

        let credentials = Credentials::from_env().unwrap();
        assert_eq!(credentials.api_key, "test-key");
        assert_eq!(credentials.api_secret, "test-secret");

        std::env::remove_var(API_SECRET_ENV);
        assert!(Credentials::from_env().is_err());

        std::env::remove_var(API_KEY_ENV);
        assert!(Credentials::from_env().is_err());
    }

    #[test]
    fn test_credentials_debug_is_masked() {
        let credentials = Credentials {
            api_key: "vmPUZE6mv9SD5VNHk4HlWFsO".to_string(),
            api_secret: "NhqPtmdSJYdKjVHjA7PZj4Mg".to_string(),
        };

        let rendered = format!("{:?}", credentials);
        assert!(!rendered.contains("NhqPtmdSJYdKjVHjA7PZj4Mg"));
        assert!(!rendered.contains("vmPUZE6mv9SD5VNHk4HlWFsO"));
        assert!(rendered.contains("***REDACTED***"));
    }
}
