//! Connector profile configuration handler.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::traits::ConfigurationProvider;
use crate::credentials::{
    resolve_service_account, SecretStore, CLIENT_EMAIL_KEY, PRIVATE_KEY_KEY,
};
use crate::rpc::ReportClientFactory;
use crate::transformations::{ConnectorError, PROPERTY_ID_KEY};
use crate::types::config::connector::ConnectorConfig;
use crate::types::host::{
    AuthParameter, AuthenticationConfig, ConnectorMode, ConnectorRuntimeSetting,
    ConnectorRuntimeSettingDataType, ConnectorRuntimeSettingScope, CustomAuthConfig,
    DescribeConnectorConfigurationRequest, DescribeConnectorConfigurationResponse, Status,
    ValidateConnectorRuntimeSettingsRequest, ValidateConnectorRuntimeSettingsResponse,
    ValidateCredentialsRequest, ValidateCredentialsResponse,
};

pub const SUPPORTED_API_VERSION: &str = "GoogleAnalyticsDataAPIv1";
pub const CUSTOM_AUTHENTICATION_TYPE: &str = "CUSTOM";

pub fn authentication_config() -> AuthenticationConfig {
    AuthenticationConfig {
        is_basic_auth_supported: false,
        is_api_key_auth_supported: false,
        is_o_auth2_supported: false,
        is_custom_auth_supported: true,
        custom_auth_config: vec![CustomAuthConfig {
            authentication_type: CUSTOM_AUTHENTICATION_TYPE.to_string(),
            auth_parameters: vec![
                AuthParameter {
                    key: PRIVATE_KEY_KEY.to_string(),
                    required: true,
                    label: "Private Key".to_string(),
                    description: "Service account private_key (replace spaces with \\s)"
                        .to_string(),
                    sensitive_field: true,
                    connector_supplied_values: None,
                },
                AuthParameter {
                    key: CLIENT_EMAIL_KEY.to_string(),
                    required: true,
                    label: "Client Email".to_string(),
                    description: "xxxxxx@xxxx.iam.gserviceaccount.com".to_string(),
                    sensitive_field: false,
                    connector_supplied_values: None,
                },
            ],
        }],
    }
}

pub fn property_id_setting() -> ConnectorRuntimeSetting {
    ConnectorRuntimeSetting {
        key: PROPERTY_ID_KEY.to_string(),
        data_type: ConnectorRuntimeSettingDataType::String,
        required: true,
        label: "GA4 Property ID".to_string(),
        description: "GA4 Property ID".to_string(),
        scope: ConnectorRuntimeSettingScope::ConnectorProfile,
    }
}

pub struct ConfigurationHandler {
    config: ConnectorConfig,
    secrets: Arc<dyn SecretStore>,
    clients: Arc<dyn ReportClientFactory>,
}

impl ConfigurationHandler {
    pub fn new(
        config: ConnectorConfig,
        secrets: Arc<dyn SecretStore>,
        clients: Arc<dyn ReportClientFactory>,
    ) -> Self {
        Self {
            config,
            secrets,
            clients,
        }
    }

    async fn check_credentials(
        &self,
        request: &ValidateCredentialsRequest,
    ) -> Result<(), ConnectorError> {
        let secret_arn = request.credentials.as_ref().map(|c| c.secret_arn.as_str());
        let key =
            resolve_service_account(self.secrets.as_ref(), secret_arn, &self.config.token_uri)
                .await?;
        let client_email = key.client_email.clone();
        // Building the client validates the PEM; no request is sent.
        self.clients.create(key)?;
        tracing::debug!(client_email = client_email.as_str(), "Service account key parsed");
        Ok(())
    }
}

#[async_trait]
impl ConfigurationProvider for ConfigurationHandler {
    async fn validate_connector_runtime_settings(
        &self,
        request: &ValidateConnectorRuntimeSettingsRequest,
    ) -> ValidateConnectorRuntimeSettingsResponse {
        let property_id = request
            .connector_runtime_settings
            .get(PROPERTY_ID_KEY)
            .filter(|v| !v.trim().is_empty());

        if property_id.is_some() {
            return ValidateConnectorRuntimeSettingsResponse {
                status: Status::success(),
                errors_by_field: HashMap::new(),
            };
        }

        let err = ConnectorError::missing_setting(PROPERTY_ID_KEY);
        tracing::warn!(error = %err, "Runtime settings rejected");
        ValidateConnectorRuntimeSettingsResponse {
            status: Status::failure(err.to_error_details()),
            errors_by_field: HashMap::from([(
                PROPERTY_ID_KEY.to_string(),
                vec![err.to_string()],
            )]),
        }
    }

    async fn validate_credentials(
        &self,
        request: &ValidateCredentialsRequest,
    ) -> ValidateCredentialsResponse {
        match self.check_credentials(request).await {
            Ok(()) => ValidateCredentialsResponse {
                status: Status::success(),
            },
            Err(e) => {
                tracing::warn!(error = %e, "Credential validation failed");
                ValidateCredentialsResponse {
                    status: Status::failure(e.to_error_details()),
                }
            }
        }
    }

    async fn describe_connector_configuration(
        &self,
        _request: &DescribeConnectorConfigurationRequest,
    ) -> DescribeConnectorConfigurationResponse {
        DescribeConnectorConfigurationResponse {
            status: Status::success(),
            connector_owner: self.config.connector_owner.clone(),
            connector_name: self.config.connector_name.clone(),
            connector_version: self.config.connector_version.clone(),
            connector_modes: vec![ConnectorMode::Source],
            authentication_config: authentication_config(),
            connector_runtime_setting: vec![property_id_setting()],
            supported_api_versions: vec![SUPPORTED_API_VERSION.to_string()],
        }
    }
}
