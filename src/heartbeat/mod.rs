//! Heartbeat service - periodic liveness message to the owner chat.

mod message;
mod service;

pub use message::{heartbeat_message, HeartbeatCode, HEARTBEAT_TEXT};
pub use service::HeartbeatService;
