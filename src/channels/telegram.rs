//! Telegram channel backed by teloxide.
//!
//! Inbound updates arrive through teloxide's long-polling `Dispatcher`;
//! outbound text goes through `Bot::send_message`.

use std::time::Duration;

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::ChatId;
use teloxide::utils::command::BotCommands;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::commands::{respond, Command};
use crate::error::Result;

use super::MessageSender;

/// How long to wait before asking an idle dispatcher to stop again.
const SHUTDOWN_RETRY_DELAY: Duration = Duration::from_millis(100);

#[async_trait]
impl MessageSender for Bot {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<()> {
        self.send_message(chat_id, text).await?;
        debug!("Telegram: message sent to chat {}", chat_id);
        Ok(())
    }
}

/// Publish the command list so clients show it in the command menu.
pub async fn set_commands(bot: &Bot) -> Result<()> {
    bot.set_my_commands(Command::bot_commands()).await?;
    Ok(())
}

async fn answer(bot: Bot, msg: Message, cmd: Command) -> Result<()> {
    info!(
        "Telegram: {:?} from chat {} (user {:?})",
        cmd,
        msg.chat.id,
        msg.from().map(|user| user.id)
    );
    respond(&bot, msg.chat.id, cmd).await
}

/// Run the long-polling dispatcher until `shutdown` flips to `true` (or its
/// sender is dropped).
pub async fn run_dispatcher(bot: Bot, mut shutdown: watch::Receiver<bool>) {
    let handler = Update::filter_message()
        .filter_command::<Command>()
        .endpoint(answer);

    let mut dispatcher = Dispatcher::builder(bot, handler)
        .default_handler(|update| async move {
            debug!("Telegram: ignoring update {}", update.id);
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "Telegram: command handler failed",
        ))
        .build();

    let token = dispatcher.shutdown_token();
    let stopper = tokio::spawn(async move {
        while !*shutdown.borrow() {
            if shutdown.changed().await.is_err() {
                break;
            }
        }

        info!("Telegram: stopping dispatcher");
        loop {
            match token.shutdown() {
                Ok(done) => {
                    done.await;
                    break;
                }
                Err(_) => {
                    // Not polling yet (or already stopped); try again shortly.
                    warn!("Telegram: dispatcher idle, retrying shutdown");
                    tokio::time::sleep(SHUTDOWN_RETRY_DELAY).await;
                }
            }
        }
    });

    info!("Telegram: dispatcher started (long polling)");
    dispatcher.dispatch().await;
    stopper.abort();
    info!("Telegram: dispatcher stopped");
}
