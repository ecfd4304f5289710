use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single summarize call. Every variant ends up as the message of
/// the `Error` lifecycle state, so `Display` is what the user reads.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SummarizeError {
    #[error("{0}")]
    Transport(String),

    #[error("{}", server_message(.status, .detail))]
    Server { status: u16, detail: Option<String> },

    #[error("Malformed response from summarization backend: {0}")]
    MalformedResponse(String),
}

fn server_message(status: &u16, detail: &Option<String>) -> String {
    match detail {
        Some(detail) => detail.clone(),
        None => format!("Unknown error (HTTP {status})"),
    }
}

impl From<reqwest::Error> for SummarizeError {
    fn from(err: reqwest::Error) -> Self {
        SummarizeError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for SummarizeError {
    fn from(err: serde_json::Error) -> Self {
        SummarizeError::MalformedResponse(err.to_string())
    }
}

/// Why a submission was refused before any network call was made.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejected {
    #[error("Video URL is empty")]
    EmptyUrl,

    #[error("A summary request is already in flight")]
    Busy,

    #[error("A summary is being shown; reset before submitting another")]
    ResultShown,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid backend URL {value}: {reason}")]
    InvalidBaseUrl { value: String, reason: String },

    #[error("Invalid timeout {value}: expected a positive number of seconds")]
    InvalidTimeout { value: String },

    #[error("Failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
