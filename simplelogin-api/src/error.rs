// simplelogin-api/src/error.rs
use crate::http::HttpError;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Connect, DNS, timeout or body-read failure
    #[error(transparent)]
    Transport(#[from] HttpError),

    /// Non-2xx status; `message` is the server's `error` field or the raw body
    #[error("HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("failed to decode response")]
    Decode(#[source] serde_json::Error),

    #[error("failed to encode request")]
    Encode(#[source] serde_json::Error),

    #[error("at least one mailbox id is required")]
    EmptyMailboxIds,

    #[error("no mailboxes found in account")]
    NoMailboxes,

    #[error("deadline exceeded after {0:?}")]
    DeadlineExceeded(Duration),
}

impl Error {
    /// HTTP status of an API error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for problems detected locally before any request was sent
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyMailboxIds)
    }
}
