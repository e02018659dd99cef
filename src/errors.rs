/*!
 * Error types for the subrelay application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to the subtitle search API
#[derive(Error, Debug)]
pub enum SearchError {
    /// Error when making an API request fails
    #[error("Search request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse search response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("Search API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },
}

/// Errors that can occur when handing work to the translation queue
#[derive(Error, Debug)]
pub enum QueueError {
    /// The queue has no consumer side anymore
    #[error("Translation queue is closed")]
    Closed,
}

/// Errors that can occur while writing notification subtitles
#[derive(Error, Debug)]
pub enum NotifyError {
    /// Error writing the message file
    #[error("Failed to write notification subtitle: {0}")]
    WriteFailed(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from configuration loading or validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the subtitle search provider
    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    /// Error from the translation queue
    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),

    /// Error from the notification sink
    #[error("Notify error: {0}")]
    Notify(#[from] NotifyError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::Notify(NotifyError::WriteFailed(error.to_string()))
    }
}
