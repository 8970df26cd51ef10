//! Credential resolution error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("No credentials were supplied with the request")]
    MissingReference,

    #[error("Failed to retrieve secret '{secret}': {message}")]
    Retrieval { secret: String, message: String },

    #[error("Secret '{0}' has no string payload")]
    EmptySecret(String),

    #[error("Secret payload is not a JSON object: {0}")]
    InvalidPayload(String),

    #[error("Secret payload is missing required key: {0}")]
    MissingField(&'static str),

    #[error("Private key is not a valid RSA PEM key: {0}")]
    InvalidKey(String),
}

impl CredentialError {
    pub fn retrieval(secret: &str, message: impl Into<String>) -> Self {
        Self::Retrieval {
            secret: secret.to_string(),
            message: message.into(),
        }
    }
}
