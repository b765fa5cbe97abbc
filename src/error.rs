//! Errors that can happen when talking to a task store

use std::fmt::{Display, Formatter};

/// The broad category of a store failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request never completed, or the server refused it without saying why
    Network,
    /// The server refused the request and explained why
    Validation,
    /// Anything else
    Unknown,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::Network => write!(f, "network error"),
            Self::Validation => write!(f, "validation error"),
            Self::Unknown => write!(f, "unknown error"),
        }
    }
}


/// A failed call to a [`TaskStore`](crate::traits::TaskStore).
///
/// The `Display` output of this error is meant to be shown to the user as-is.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The HTTP request could not be sent or its response could not be read
    #[error("Unable to reach the task server ({0})")]
    Network(String),

    /// Listing tasks returned a non-successful status
    #[error("Failed to fetch tasks")]
    Fetch { status: u16 },

    /// The server rejected the request with an explanation
    #[error("{message}")]
    Validation { status: u16, message: String },

    /// Creating a task returned a non-successful status, without any explanation
    #[error("Failed to create task")]
    Creation { status: u16 },

    /// Deleting a task returned a non-successful status, without any explanation
    #[error("Failed to delete task")]
    Deletion { status: u16 },

    #[error("{0}")]
    Unknown(String),
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) => ErrorKind::Network,
            Self::Fetch { .. } => ErrorKind::Network,
            Self::Creation { .. } => ErrorKind::Network,
            Self::Deletion { .. } => ErrorKind::Network,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Unknown(_) => ErrorKind::Unknown,
        }
    }

    /// The HTTP status code the server replied with, if the request went that far
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Fetch { status } => Some(*status),
            Self::Validation { status, .. } => Some(*status),
            Self::Creation { status } => Some(*status),
            Self::Deletion { status } => Some(*status),
            Self::Network(_) | Self::Unknown(_) => None,
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Unknown(format!("Unexpected data from the task server: {}", err))
    }
}

impl From<url::ParseError> for StoreError {
    fn from(err: url::ParseError) -> Self {
        Self::Unknown(format!("Invalid task URL: {}", err))
    }
}
