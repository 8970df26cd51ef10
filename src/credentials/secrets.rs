//! Secret storage backends.

use async_trait::async_trait;
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use aws_sdk_secretsmanager::Client;

use super::error::CredentialError;
use super::service_account::ServiceAccountKey;

/// Resolves an opaque credential reference into its secret payload.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetch the string payload of the secret identified by `secret_id`.
    async fn secret_string(&self, secret_id: &str) -> Result<String, CredentialError>;
}

/// Resolve a credential reference all the way to a service-account key.
pub async fn resolve_service_account(
    store: &dyn SecretStore,
    secret_id: Option<&str>,
    token_uri: &str,
) -> Result<ServiceAccountKey, CredentialError> {
    let secret_id = secret_id
        .filter(|id| !id.is_empty())
        .ok_or(CredentialError::MissingReference)?;
    let payload = store.secret_string(secret_id).await?;
    ServiceAccountKey::from_secret_string(&payload, token_uri)
}

/// AWS Secrets Manager backed store.
#[derive(Debug, Clone)]
pub struct AwsSecretStore {
    client: Client,
}

impl AwsSecretStore {
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }

    /// Build from the default AWS credential/region chain.
    pub async fn from_env() -> Self {
        let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(&sdk_config)
    }
}

#[async_trait]
impl SecretStore for AwsSecretStore {
    async fn secret_string(&self, secret_id: &str) -> Result<String, CredentialError> {
        let output = self
            .client
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .map_err(|e| {
                CredentialError::retrieval(secret_id, DisplayErrorContext(&e).to_string())
            })?;

        output
            .secret_string()
            .map(str::to_string)
            .ok_or_else(|| CredentialError::EmptySecret(secret_id.to_string()))
    }
}
