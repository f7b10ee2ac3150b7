//! Error types for the security checker
//!
//! Errors fall into three groups. Configuration errors abort the run before
//! any request is made. Transport errors are caught per scenario and turned
//! into a failed result. Everything else is plumbing.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the security checker
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    #[error("Invalid configuration file '{path}': {error}")]
    ConfigParse { path: String, error: String },

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    #[error("No scenarios match --only filter: {0}")]
    NoScenariosMatched(String),

    #[error("Duplicate scenario name '{0}'")]
    DuplicateScenario(String),

    #[error("Invalid scenario '{name}': {reason}")]
    InvalidScenario { name: String, reason: String },

    // === Transport Errors ===
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Failed to read payload '{path}': {error}")]
    Payload { path: String, error: String },

    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    // === IO / Serialization Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid scenario error
    pub fn invalid_scenario(name: &str, reason: &str) -> Self {
        Self::InvalidScenario {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a payload read error
    pub fn payload(path: &std::path::Path, error: &io::Error) -> Self {
        Self::Payload {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }

    /// Whether this error means no response could be obtained for one scenario.
    ///
    /// Transport errors fail a single scenario; the run moves on to the next.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Timeout(_)
                | Error::Connect(_)
                | Error::Http(_)
                | Error::Payload { .. }
                | Error::InvalidHeader { .. }
        )
    }

    /// Wrap a reqwest error, lifting timeouts and connect failures into their own variants
    ///
    /// reqwest's own message only names the URL; the cause lives in the source chain.
    pub fn from_reqwest(error: reqwest::Error, timeout_secs: u64) -> Self {
        if error.is_timeout() {
            Error::Timeout(timeout_secs)
        } else if error.is_connect() {
            Error::Connect(error_chain(&error))
        } else {
            Error::Http(error_chain(&error))
        }
    }
}

/// Render an error followed by its sources, e.g. "outer: middle: root"
pub fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        // Some layers repeat their inner message in their own Display
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
