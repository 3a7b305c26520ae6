//! # Azonbot Telegram
//! Telegram Bot API over plain HTTPS: Markdown message delivery (the
//! `Notifier` implementation used by dispatch), long-poll update consumption
//! for the onboarding conversation, and reply-keyboard builders.

pub mod client;
pub mod keyboard;
pub mod types;

pub use client::TelegramBot;
pub use keyboard::{KeyboardButton, ReplyKeyboardMarkup, reply_keyboard};
pub use types::{BotUser, Chat, Incoming, Update};
