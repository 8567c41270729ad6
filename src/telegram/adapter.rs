//! Outbound side of the transport: sending replies through the Bot API.

use std::path::Path;

use async_trait::async_trait;
use teloxide::payloads::{SendDocumentSetters, SendMessageSetters};
use teloxide::prelude::*;
use teloxide::types::{
    ChatAction, ChatId, InlineKeyboardButton, InlineKeyboardMarkup, InputFile, ParseMode,
};

use crate::dialogue::{ReplyPort, TextOptions, TransportError};

/// Bot API implementation of the dialogue engine's outbound port.
pub struct BotAdapter {
    bot: Bot,
}

impl BotAdapter {
    /// Wraps a connected bot.
    #[must_use]
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl ReplyPort for BotAdapter {
    async fn send_text(
        &self,
        chat_id: i64,
        body: &str,
        options: &TextOptions,
    ) -> Result<(), TransportError> {
        let mut request = self.bot.send_message(ChatId(chat_id), body);

        if options.markdown {
            request = request.parse_mode(ParseMode::Markdown);
        }
        if let Some(markup) = keyboard(options) {
            request = request.reply_markup(markup);
        }

        request.await.map(|_| ()).map_err(to_transport_error)
    }

    async fn send_document(
        &self,
        chat_id: i64,
        path: &Path,
        file_name: &str,
        caption: &str,
    ) -> Result<(), TransportError> {
        let document = InputFile::file(path.to_path_buf()).file_name(file_name.to_owned());

        self.bot
            .send_document(ChatId(chat_id), document)
            .caption(caption.to_owned())
            .await
            .map(|_| ())
            .map_err(to_transport_error)
    }

    async fn send_typing(&self, chat_id: i64) -> Result<(), TransportError> {
        self.bot
            .send_chat_action(ChatId(chat_id), ChatAction::Typing)
            .await
            .map(|_| ())
            .map_err(to_transport_error)
    }
}

impl std::fmt::Debug for BotAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotAdapter").finish_non_exhaustive()
    }
}

/// Builds the inline keyboard, if the message carries buttons.
fn keyboard(options: &TextOptions) -> Option<InlineKeyboardMarkup> {
    if options.buttons.is_empty() {
        return None;
    }

    let rows = options.buttons.iter().map(|row| {
        row.iter()
            .map(|button| {
                InlineKeyboardButton::callback(button.label, button.token.as_callback_data())
            })
            .collect::<Vec<_>>()
    });

    Some(InlineKeyboardMarkup::new(rows))
}

fn to_transport_error(error: teloxide::RequestError) -> TransportError {
    TransportError(error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::{Button, ButtonToken};

    #[test]
    fn test_no_keyboard_without_buttons() {
        assert!(keyboard(&TextOptions::plain()).is_none());
        assert!(keyboard(&TextOptions::markdown()).is_none());
    }

    #[test]
    fn test_keyboard_preserves_rows() {
        let options = TextOptions::with_buttons(vec![
            vec![
                Button::new("Mi número mágico", ButtonToken::ProfileNumber),
                Button::new("Número del día", ButtonToken::DayNumber),
            ],
            vec![Button::new("Salir", ButtonToken::Exit)],
        ]);

        let markup = keyboard(&options).unwrap();
        assert_eq!(markup.inline_keyboard.len(), 2);
        assert_eq!(markup.inline_keyboard[0].len(), 2);
        assert_eq!(markup.inline_keyboard[1].len(), 1);
    }
}
