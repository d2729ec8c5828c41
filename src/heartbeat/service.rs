//! Heartbeat service implementation.

use std::sync::Arc;
use std::time::Duration;

use teloxide::types::ChatId;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::channels::MessageSender;
use crate::config::HeartbeatConfig;
use crate::error::Result;

use super::message::{heartbeat_message, HeartbeatCode};

/// Background service that periodically sends a heartbeat to the owner chat.
///
/// The loop waits `interval`, sends, and on success flips the code and waits
/// `interval` again. A failed send is logged and retried after `retry_delay`
/// with the same code. It never gives up on its own; only the shutdown
/// signal ends it.
pub struct HeartbeatService {
    owner_id: ChatId,
    interval: Duration,
    retry_delay: Duration,
    sender: Arc<dyn MessageSender>,
}

impl HeartbeatService {
    /// Create a new heartbeat service.
    pub fn new(owner_id: ChatId, config: HeartbeatConfig, sender: Arc<dyn MessageSender>) -> Self {
        Self {
            owner_id,
            interval: config.interval,
            retry_delay: config.retry_delay,
            sender,
        }
    }

    /// Start the heartbeat loop in the background.
    pub fn start(self, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }

    /// Run the heartbeat loop until `shutdown` flips to `true` (or its sender
    /// is dropped).
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(
            "Heartbeat service started (owner={}, interval={}s, retry={}s)",
            self.owner_id,
            self.interval.as_secs(),
            self.retry_delay.as_secs()
        );

        let mut code = HeartbeatCode::default();
        let mut delay = self.interval;

        loop {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = shutdown_requested(&mut shutdown) => {
                    info!("Heartbeat service stopped");
                    break;
                }
            }

            match self.tick(code).await {
                Ok(()) => {
                    debug!("Heartbeat {} delivered", code);
                    code = code.next();
                    delay = self.interval;
                }
                Err(e) => {
                    error!(
                        "Heartbeat {} failed: {} (retrying in {}s)",
                        code,
                        e,
                        self.retry_delay.as_secs()
                    );
                    delay = self.retry_delay;
                }
            }
        }
    }

    async fn tick(&self, code: HeartbeatCode) -> Result<()> {
        self.sender
            .send_text(self.owner_id, &heartbeat_message(code))
            .await
    }
}

/// Resolves once shutdown has been requested.
async fn shutdown_requested(shutdown: &mut watch::Receiver<bool>) {
    while !*shutdown.borrow() {
        if shutdown.changed().await.is_err() {
            return;
        }
    }
}
