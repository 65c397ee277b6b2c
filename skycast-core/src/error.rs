//! Error taxonomy shared by every stage of the pipeline.

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

use crate::provider::ProviderId;

pub type Result<T, E = SkycastError> = std::result::Result<T, E>;

/// Coarse classification of a [`SkycastError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Input,
    Transport,
    Decode,
    Provider,
    Config,
    Export,
}

#[derive(Debug, Error)]
pub enum SkycastError {
    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Failed to send request to {provider}")]
    Request {
        provider: ProviderId,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} request failed with status {status}: {body}")]
    Status {
        provider: ProviderId,
        status: StatusCode,
        body: String,
    },

    #[error("Failed to parse {provider} JSON")]
    Decode {
        provider: ProviderId,
        #[source]
        source: serde_json::Error,
    },

    #[error("{provider} returned an error: {message}")]
    Provider {
        provider: ProviderId,
        message: String,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to write CSV export to {}", .path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl SkycastError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Input(_) => ErrorKind::Input,
            // Both a failed connection and a non-success status are transport failures.
            Self::Request { .. } | Self::Status { .. } => ErrorKind::Transport,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::Provider { .. } => ErrorKind::Provider,
            Self::Config(_) => ErrorKind::Config,
            Self::Export { .. } => ErrorKind::Export,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_are_transport_errors() {
        let err = SkycastError::Status {
            provider: ProviderId::SevenTimer,
            status: StatusCode::BAD_GATEWAY,
            body: "upstream down".into(),
        };

        assert_eq!(err.kind(), ErrorKind::Transport);
        let msg = err.to_string();
        assert!(msg.contains("7timer"));
        assert!(msg.contains("502"));
        assert!(msg.contains("upstream down"));
    }

    #[test]
    fn provider_error_mentions_message() {
        let err = SkycastError::Provider {
            provider: ProviderId::SunriseSunset,
            message: "status INVALID_REQUEST".into(),
        };

        assert_eq!(err.kind(), ErrorKind::Provider);
        assert!(err.to_string().contains("INVALID_REQUEST"));
    }
}
