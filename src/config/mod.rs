//! Configuration module for the numerology bot.
//!
//! Everything is environment-driven: the bot token and delivery mode for
//! the transport, plus a few tunables for the bot itself.

mod settings;

pub use settings::{BotSettings, ConfigError, TelegramConfig, WebhookConfig};
