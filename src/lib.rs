//! Numerología Bot Library
//!
//! A Telegram bot that computes numerology and astrology readings.
//!
//! This crate provides the core functionality for:
//! - Calculating life-path, expression, zodiac and Chinese zodiac artifacts
//! - Sequencing multi-turn dialogs through a per-user state machine
//! - Rendering a composite PDF report delivered as a file attachment
//! - Talking to the Telegram Bot API via long polling or a webhook

pub mod config;
pub mod content;
pub mod dialogue;
pub mod numerology;
pub mod report;
pub mod telegram;
