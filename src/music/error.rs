use std::{fmt, io};

use reqwest::StatusCode;

/// Failure of a single upstream attempt.
///
/// These never leave the providers: each one is logged and the next mirror
/// or endpoint is tried. Callers only see "no result".
#[derive(Debug)]
pub enum ProviderError {
    Http(reqwest::Error),
    Status(StatusCode),
    Timeout,
    Decode(String),
    Empty,
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else if err.is_decode() {
            ProviderError::Decode(err.to_string())
        } else {
            ProviderError::Http(err)
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Http(e) => write!(f, "request failed: {}", e),
            ProviderError::Status(status) => write!(f, "returned status {}", status.as_u16()),
            ProviderError::Timeout => write!(f, "timed out"),
            ProviderError::Decode(e) => write!(f, "unreadable response: {}", e),
            ProviderError::Empty => write!(f, "returned no usable results"),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Failure of a blocking extraction call.
#[derive(Debug)]
pub enum ExtractError {
    NotInstalled(String),
    Io(io::Error),
    Failed { status: Option<i32>, stderr: String },
    Json(serde_json::Error),
    Join(String),
}

impl From<io::Error> for ExtractError {
    fn from(err: io::Error) -> Self {
        ExtractError::Io(err)
    }
}

impl From<serde_json::Error> for ExtractError {
    fn from(err: serde_json::Error) -> Self {
        ExtractError::Json(err)
    }
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::NotInstalled(bin) => {
                write!(f, "{} is not installed, YouTube/SoundCloud fallback unavailable", bin)
            }
            ExtractError::Io(e) => write!(f, "io error: {}", e),
            ExtractError::Failed { status, stderr } => match status {
                Some(code) => write!(f, "exited with status {}: {}", code, stderr.trim()),
                None => write!(f, "terminated by signal: {}", stderr.trim()),
            },
            ExtractError::Json(e) => write!(f, "invalid info record: {}", e),
            ExtractError::Join(e) => write!(f, "worker failed: {}", e),
        }
    }
}

impl std::error::Error for ExtractError {}
