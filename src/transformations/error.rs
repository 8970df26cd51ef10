//! Connector error taxonomy and its mapping onto host error codes.

use thiserror::Error;

use crate::credentials::CredentialError;
use crate::rpc::{ClientBuildError, ReportError};
use crate::types::host::{ErrorCode, ErrorDetails};

#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("{key} should be provided as runtime setting")]
    Configuration { key: String },

    #[error("{entity_id} is not valid entity")]
    UnsupportedEntity { entity_id: String },

    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),

    #[error("Failed to set up report client: {0}")]
    ClientSetup(String),

    #[error("Realtime report request failed: {0}")]
    RemoteReport(#[from] ReportError),

    #[error("Malformed report row {row_index}: {message}")]
    MalformedRow { row_index: usize, message: String },

    #[error("Failed to serialize record: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<ClientBuildError> for ConnectorError {
    fn from(e: ClientBuildError) -> Self {
        match e {
            ClientBuildError::Credential(e) => Self::Credential(e),
            ClientBuildError::Http(message) => Self::ClientSetup(message),
        }
    }
}

impl ConnectorError {
    pub fn missing_setting(key: &str) -> Self {
        Self::Configuration {
            key: key.to_string(),
        }
    }

    pub fn unsupported_entity(entity_id: &str) -> Self {
        Self::UnsupportedEntity {
            entity_id: entity_id.to_string(),
        }
    }

    pub fn malformed_row(row_index: usize, message: impl Into<String>) -> Self {
        Self::MalformedRow {
            row_index,
            message: message.into(),
        }
    }

    /// Host error code for this failure.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::Configuration { .. } | Self::UnsupportedEntity { .. } => {
                ErrorCode::InvalidArgument
            }
            Self::Credential(_) => ErrorCode::InvalidCredentials,
            Self::RemoteReport(ReportError::Auth(_)) => ErrorCode::InvalidCredentials,
            Self::RemoteReport(ReportError::InvalidUrl(_)) => ErrorCode::ClientError,
            Self::RemoteReport(e) => match e.status_code() {
                Some(401) => ErrorCode::InvalidCredentials,
                Some(403) => ErrorCode::AccessDenied,
                Some(429) => ErrorCode::RateLimitExceeded,
                Some(400..=499) => ErrorCode::ClientError,
                _ => ErrorCode::ServerError,
            },
            Self::ClientSetup(_) | Self::MalformedRow { .. } | Self::Serialization(_) => {
                ErrorCode::ServerError
            }
        }
    }

    pub fn to_error_details(&self) -> ErrorDetails {
        ErrorDetails::new(self.error_code(), self.to_string())
    }
}
