//! Service-account key parsed from the connector profile secret.

use std::fmt;

use serde::Deserialize;

use super::error::CredentialError;

/// Secret key holding the service account's PEM private key.
pub const PRIVATE_KEY_KEY: &str = "privateKey";
/// Secret key holding the service account's client email.
pub const CLIENT_EMAIL_KEY: &str = "clientEmail";

/// Restore the escape markers the host form forces onto the PEM key.
///
/// `\s` becomes a space and `\n` a newline, in that order. Nothing else is
/// unescaped.
pub fn unescape_private_key(raw: &str) -> String {
    raw.replace("\\s", " ").replace("\\n", "\n")
}

#[derive(Clone, PartialEq, Eq)]
pub struct ServiceAccountKey {
    pub private_key: String,
    pub client_email: String,
    pub token_uri: String,
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// JSON document stored in the connector profile secret.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SecretPayload {
    #[serde(default)]
    private_key: Option<String>,
    #[serde(default)]
    client_email: Option<String>,
}

fn required(value: Option<String>, key: &'static str) -> Result<String, CredentialError> {
    value
        .filter(|s| !s.is_empty())
        .ok_or(CredentialError::MissingField(key))
}

impl ServiceAccountKey {
    /// Parse the secret's JSON payload.
    pub fn from_secret_string(payload: &str, token_uri: &str) -> Result<Self, CredentialError> {
        let payload: SecretPayload = serde_json::from_str(payload)
            .map_err(|e| CredentialError::InvalidPayload(e.to_string()))?;

        let private_key = unescape_private_key(&required(payload.private_key, PRIVATE_KEY_KEY)?);
        let client_email = required(payload.client_email, CLIENT_EMAIL_KEY)?;

        Ok(Self {
            private_key,
            client_email,
            token_uri: token_uri.to_string(),
        })
    }
}
