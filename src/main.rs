//! Numerología Bot - Main Entry Point
//!
//! A Telegram bot that calculates numerology readings (life-path number,
//! expression number, zodiac signs) and full PDF reports from chat
//! conversations.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use teloxide::Bot;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use numerologia_bot::config::{BotSettings, TelegramConfig};
use numerologia_bot::dialogue::DialogueEngine;
use numerologia_bot::report::ReportRenderer;
use numerologia_bot::telegram::{self, BotAdapter};

/// Telegram bot for numerology readings.
#[derive(Parser, Debug)]
#[command(name = "numerologia_bot")]
#[command(about = "Calculate numerology readings over Telegram")]
#[command(version)]
struct Args {
    /// Path to the .env file for environment variables.
    #[arg(long, default_value = ".env")]
    env_file: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_logging(&args.log_level);

    // Load environment variables
    if let Err(e) = dotenvy::from_filename(&args.env_file) {
        debug!("Could not load .env file ({}): {}", args.env_file, e);
    }

    // Load configurations
    let tg_config = TelegramConfig::from_env()
        .context("Failed to load Telegram configuration from environment")?;

    let settings = BotSettings::from_env_with_defaults();

    info!(
        "Configuration loaded (delivery: {}, report timeout: {}s)",
        if tg_config.webhook.is_some() {
            "webhook"
        } else {
            "long polling"
        },
        settings.report_timeout_secs
    );

    let bot = Bot::new(&tg_config.bot_token);

    let adapter = Arc::new(BotAdapter::new(bot.clone()));
    let engine = Arc::new(DialogueEngine::new(
        adapter,
        ReportRenderer::new(),
        Duration::from_secs(settings.report_timeout_secs),
    ));

    info!("Starting numerology bot...");

    telegram::run(bot, engine, tg_config.webhook)
        .await
        .context("Failed to run the Telegram dispatcher")?;

    info!("Shutting down...");

    Ok(())
}

/// Initializes the logging subsystem.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
