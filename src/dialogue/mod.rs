//! Conversation state machine module.
//!
//! Tracks, per user, which input the bot is waiting for and turns inbound
//! events into calculator calls, report renders and outbound replies.

mod engine;
mod events;
mod machine;
mod session;

pub use engine::{DialogueEngine, ReplyPort, TransportError};
pub use events::{Action, Button, ButtonToken, Command, InboundEvent, TextOptions};
pub use machine::handle_event;
pub use session::{Awaiting, Session, SessionStore};
