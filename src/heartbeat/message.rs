//! Heartbeat message text and the alternating code carried in it.

use std::fmt;

/// Fixed descriptive part of every heartbeat message.
pub const HEARTBEAT_TEXT: &str = "bot is up and running";

/// Two-valued code that flips after every delivered heartbeat.
///
/// The owner can tell two consecutive heartbeats apart (and spot a missed
/// one) by watching the code alternate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeartbeatCode {
    #[default]
    One,
    Two,
}

impl HeartbeatCode {
    /// The other code.
    pub fn next(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    /// Numeric value shown in the message.
    pub fn value(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }
}

impl fmt::Display for HeartbeatCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Render the heartbeat message for `code`.
pub fn heartbeat_message(code: HeartbeatCode) -> String {
    format!("Heartbeat {}: {}", code, HEARTBEAT_TEXT)
}
