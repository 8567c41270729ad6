//! Inbound side of the transport: update dispatching.
//!
//! Translates Bot API updates (commands, callback queries, free text)
//! into [`InboundEvent`]s and hands them to the dialogue engine. Handler
//! failures never escape: every endpoint absorbs its own errors so one
//! user's update cannot stop the dispatcher.

use std::net::SocketAddr;
use std::sync::Arc;

use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::macros::BotCommands;
use teloxide::prelude::*;
use teloxide::types::ChatId;
use teloxide::update_listeners::webhooks;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::WebhookConfig;
use crate::dialogue::{ButtonToken, Command, DialogueEngine, InboundEvent};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Errors that can occur while starting the transport.
#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("Failed to start the webhook listener: {0}")]
    Webhook(String),
}

/// Slash commands registered with the Bot API.
#[derive(BotCommands, Clone, Copy, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Comandos disponibles:")]
pub enum BotCommand {
    #[command(description = "Iniciar el bot")]
    Start,

    #[command(description = "Mostrar la ayuda")]
    Help,
}

/// Runs the dispatcher until shutdown.
///
/// Delivery mode is chosen by configuration: a webhook listener when
/// `webhook` is set, long-polling otherwise. Only startup can fail;
/// per-update errors are logged and dropped.
pub async fn run(
    bot: Bot,
    engine: Arc<DialogueEngine>,
    webhook: Option<WebhookConfig>,
) -> Result<(), TelegramError> {
    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<BotCommand>()
                .endpoint(on_command),
        )
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback_query));

    let mut dispatcher = Dispatcher::builder(bot.clone(), handler)
        .dependencies(dptree::deps![engine])
        .default_handler(|update| async move {
            debug!("Ignoring unhandled update: {:?}", update);
        })
        .enable_ctrlc_handler()
        .build();

    match webhook {
        Some(config) => {
            let address = SocketAddr::from(([0, 0, 0, 0], config.port));
            info!(
                "Receiving updates via webhook {} on port {}",
                config.public_url, config.port
            );

            let listener = webhooks::axum(bot, webhooks::Options::new(address, config.public_url))
                .await
                .map_err(|e| TelegramError::Webhook(e.to_string()))?;

            dispatcher
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("Webhook update listener error"),
                )
                .await;
        }
        None => {
            info!("Receiving updates via long polling");
            dispatcher.dispatch().await;
        }
    }

    Ok(())
}

async fn on_command(msg: Message, cmd: BotCommand, engine: Arc<DialogueEngine>) -> HandlerResult {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };

    let command = match cmd {
        BotCommand::Start => Command::Start,
        BotCommand::Help => Command::Help,
    };

    engine
        .process_event(user.id.0, msg.chat.id.0, InboundEvent::Command(command))
        .await;
    Ok(())
}

async fn on_message(msg: Message, engine: Arc<DialogueEngine>) -> HandlerResult {
    let (Some(user), Some(text)) = (msg.from.as_ref(), msg.text()) else {
        return Ok(());
    };

    engine
        .process_event(
            user.id.0,
            msg.chat.id.0,
            InboundEvent::Text(text.to_owned()),
        )
        .await;
    Ok(())
}

async fn on_callback_query(
    bot: Bot,
    query: CallbackQuery,
    engine: Arc<DialogueEngine>,
) -> HandlerResult {
    // Acknowledging an already-expired press fails; that is routine, not
    // an error worth surfacing.
    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
        warn!("Failed to acknowledge callback query: {}", e);
    }

    let Some(data) = query.data.as_deref() else {
        return Ok(());
    };

    let Some(token) = ButtonToken::parse(data) else {
        warn!("Unknown callback token: {:?}", data);
        return Ok(());
    };

    let chat_id = query.message.as_ref().map_or_else(
        // Fallback for presses on very old messages: in a private chat the
        // chat id equals the user id.
        || ChatId(i64::try_from(query.from.id.0).unwrap_or_default()),
        |m| m.chat().id,
    );

    engine
        .process_event(query.from.id.0, chat_id.0, InboundEvent::Button(token))
        .await;
    Ok(())
}
