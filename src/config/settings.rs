//! Application settings and Telegram configuration.

use serde::{Deserialize, Serialize};
use url::Url;

/// Telegram Bot API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot token (obtain from `@BotFather`).
    pub bot_token: String,

    /// Push delivery settings; long-polling is used when absent.
    #[serde(default)]
    pub webhook: Option<WebhookConfig>,
}

/// Webhook (push) delivery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Publicly reachable URL Telegram should post updates to.
    pub public_url: Url,

    /// Local port the listener binds to.
    pub port: u16,
}

const DEFAULT_WEBHOOK_PORT: u16 = 8443;

impl TelegramConfig {
    /// Creates configuration for long-polling delivery.
    #[must_use]
    pub const fn new(bot_token: String) -> Self {
        Self {
            bot_token,
            webhook: None,
        }
    }

    /// Creates configuration from environment variables.
    ///
    /// Expects `BOT_TOKEN`; `WEBHOOK_URL` (plus optional `PORT`) switches
    /// delivery to webhook mode.
    ///
    /// # Errors
    ///
    /// Returns an error if `BOT_TOKEN` is missing or the webhook settings
    /// are malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bot_token =
            std::env::var("BOT_TOKEN").map_err(|_| ConfigError::MissingEnvVar("BOT_TOKEN"))?;

        let webhook = match std::env::var("WEBHOOK_URL") {
            Ok(raw) => {
                let public_url = raw.parse().map_err(|_| ConfigError::InvalidWebhookUrl)?;
                let port = match std::env::var("PORT") {
                    Ok(p) => p.parse().map_err(|_| ConfigError::InvalidPort)?,
                    Err(_) => DEFAULT_WEBHOOK_PORT,
                };
                Some(WebhookConfig { public_url, port })
            }
            Err(_) => None,
        };

        Ok(Self { bot_token, webhook })
    }
}

/// Bot-specific settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotSettings {
    /// Deadline for generating one PDF report, in seconds.
    #[serde(default = "default_report_timeout")]
    pub report_timeout_secs: u64,

    /// Log level for the application.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_report_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_owned()
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            report_timeout_secs: default_report_timeout(),
            log_level: default_log_level(),
        }
    }
}

impl BotSettings {
    /// Creates bot settings from environment variables with defaults.
    #[must_use]
    pub fn from_env_with_defaults() -> Self {
        Self {
            report_timeout_secs: std::env::var("REPORT_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_report_timeout),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| default_log_level()),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid webhook URL (must be an absolute https URL)")]
    InvalidWebhookUrl,

    #[error("Invalid port (must be a number between 1 and 65535)")]
    InvalidPort,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = BotSettings::default();
        assert_eq!(settings.report_timeout_secs, 30);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_telegram_config_new() {
        let config = TelegramConfig::new("123:abc".to_owned());
        assert_eq!(config.bot_token, "123:abc");
        assert!(config.webhook.is_none());
    }
}
