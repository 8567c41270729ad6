//! Telegram transport adapter module.
//!
//! The only code that touches the Bot API. Inbound updates are normalized
//! into dialogue events; outbound actions are delivered through the
//! [`BotAdapter`] port implementation.

mod adapter;
mod dispatch;

pub use adapter::BotAdapter;
pub use dispatch::{BotCommand, TelegramError, run};
