//! Inbound events and outbound actions of the conversation state machine.
//!
//! Everything the transport delivers is normalized into [`InboundEvent`]
//! before it reaches the state machine, and everything the machine wants
//! sent back comes out as [`Action`] values. Both sides are closed enums,
//! so dispatch is exhaustive instead of stringly typed.

use crate::numerology::BirthDate;

/// Slash commands the bot understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `/start` - reset the session and show the menu.
    Start,

    /// `/help` - show usage help.
    Help,
}

/// Fixed vocabulary of inline-button callback tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonToken {
    ProfileNumber,
    DayNumber,
    ExpressionNumber,
    FullReport,
    Retry,
    Exit,
}

impl ButtonToken {
    /// Wire representation used as callback data.
    #[must_use]
    pub const fn as_callback_data(self) -> &'static str {
        match self {
            Self::ProfileNumber => "profile_number",
            Self::DayNumber => "day_number",
            Self::ExpressionNumber => "expression_number",
            Self::FullReport => "full_report",
            Self::Retry => "retry",
            Self::Exit => "exit",
        }
    }

    /// Parses callback data back into a token.
    ///
    /// Returns `None` for anything outside the vocabulary (e.g. presses
    /// from a button of an older bot version).
    #[must_use]
    pub fn parse(data: &str) -> Option<Self> {
        match data {
            "profile_number" => Some(Self::ProfileNumber),
            "day_number" => Some(Self::DayNumber),
            "expression_number" => Some(Self::ExpressionNumber),
            "full_report" => Some(Self::FullReport),
            "retry" => Some(Self::Retry),
            "exit" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// One inbound event, abstracted from the chat transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    Command(Command),
    Button(ButtonToken),
    Text(String),
}

/// An inline button attached to an outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: &'static str,
    pub token: ButtonToken,
}

impl Button {
    #[must_use]
    pub const fn new(label: &'static str, token: ButtonToken) -> Self {
        Self { label, token }
    }
}

/// Formatting options for an outbound text message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextOptions {
    /// Render the body as Markdown.
    pub markdown: bool,

    /// Inline keyboard rows attached to the message.
    pub buttons: Vec<Vec<Button>>,
}

impl TextOptions {
    /// Plain text, no keyboard.
    #[must_use]
    pub fn plain() -> Self {
        Self::default()
    }

    /// Markdown text, no keyboard.
    #[must_use]
    pub fn markdown() -> Self {
        Self {
            markdown: true,
            ..Self::default()
        }
    }

    /// Plain text with the given keyboard rows.
    #[must_use]
    pub fn with_buttons(buttons: Vec<Vec<Button>>) -> Self {
        Self {
            markdown: false,
            buttons,
        }
    }
}

/// One outbound instruction produced by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Send a text reply.
    SendText { body: String, options: TextOptions },

    /// Show a typing indicator before a slow operation.
    SendTyping,

    /// Render the full report and deliver it as a file attachment.
    RenderReport { name: String, birth_date: BirthDate },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_data_round_trip() {
        let tokens = [
            ButtonToken::ProfileNumber,
            ButtonToken::DayNumber,
            ButtonToken::ExpressionNumber,
            ButtonToken::FullReport,
            ButtonToken::Retry,
            ButtonToken::Exit,
        ];

        for token in tokens {
            assert_eq!(ButtonToken::parse(token.as_callback_data()), Some(token));
        }
    }

    #[test]
    fn test_parse_unknown_token() {
        assert_eq!(ButtonToken::parse("consultar_otro"), None);
        assert_eq!(ButtonToken::parse(""), None);
    }
}
