use std::fmt;

use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorState {
    Disconnected,
    ReadyToUpload,
    Uploading,
    ReadyToExecute,
    Executing,
}

/// Human-readable status line plus when it was produced.
#[derive(Debug, Clone)]
pub struct StatusUpdate {
    pub text: String,
    pub at: OffsetDateTime,
}

impl StatusUpdate {
    pub fn now(text: impl Into<String>) -> Self {
        Self { text: text.into(), at: OffsetDateTime::now_utc() }
    }
}

impl Default for StatusUpdate {
    fn default() -> Self {
        Self::now("N/A")
    }
}

impl fmt::Display for StatusUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
