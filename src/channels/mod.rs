//! Outbound messaging seam.
//!
//! Both the command responder and the heartbeat only ever need to put a text
//! message into a chat. They talk to a [`MessageSender`] so the Telegram
//! client can be swapped for a mock in tests.

use async_trait::async_trait;
use teloxide::types::ChatId;

use crate::error::Result;

pub mod telegram;

pub use telegram::{run_dispatcher, set_commands};

/// Something that can deliver a text message to a chat.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Send `text` to `chat_id`.
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<()>;
}
