//! Command responder.
//!
//! The bot understands a single command, `/start`, and answers it with a
//! fixed greeting in the chat it came from.

use teloxide::types::ChatId;
use teloxide::utils::command::BotCommands;
use tracing::debug;

use crate::channels::MessageSender;
use crate::error::Result;

/// Reply sent for `/start`.
pub const GREETING: &str = "Hello! I'm alive and listening.";

/// Commands the bot reacts to.
#[derive(BotCommands, Clone, Copy, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "say hello.")]
    Start,
}

/// Fixed reply text for `command`.
pub fn reply_for(command: Command) -> &'static str {
    match command {
        Command::Start => GREETING,
    }
}

/// Answer `command` in `chat_id` with exactly one message.
pub async fn respond<S>(sender: &S, chat_id: ChatId, command: Command) -> Result<()>
where
    S: MessageSender + ?Sized,
{
    debug!("Answering {:?} in chat {}", command, chat_id);
    sender.send_text(chat_id, reply_for(command)).await
}
