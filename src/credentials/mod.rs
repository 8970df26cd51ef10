//! Credential resolution: secret store lookup and service-account key parsing.

mod error;
mod secrets;
mod service_account;

pub use error::CredentialError;
pub use secrets::{resolve_service_account, AwsSecretStore, SecretStore};
pub use service_account::{
    unescape_private_key, ServiceAccountKey, CLIENT_EMAIL_KEY, PRIVATE_KEY_KEY,
};
