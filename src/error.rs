//! Error types for backend calls, form validation and the clipboard

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a call against the Second Brain backend.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No session token was in storage when the call was made.
    #[error("No token found")]
    MissingSession,

    #[error("{operation} failed with status {status}")]
    Status {
        operation: &'static str,
        status: StatusCode,
    },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid backend URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status(),
            _ => None,
        }
    }
}

/// A required field of the add-content form was left empty.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("{0} is required")]
    MissingField(&'static str),
}

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("Nothing to copy")]
    Empty,

    #[error("Clipboard write failed: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_exposed_for_http_failures() {
        let err = ApiError::Status {
            operation: "list_content",
            status: StatusCode::UNAUTHORIZED,
        };
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
        assert_eq!(err.to_string(), "list_content failed with status 401 Unauthorized");
        assert_eq!(ApiError::MissingSession.status(), None);
    }

    #[test]
    fn draft_error_names_the_field() {
        assert_eq!(DraftError::MissingField("Title").to_string(), "Title is required");
    }
}
