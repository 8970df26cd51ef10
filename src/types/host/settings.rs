//! Connector configuration descriptors (authentication and runtime settings).

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectorMode {
    Source,
    Destination,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthParameter {
    pub key: String,
    pub required: bool,
    pub label: String,
    pub description: String,
    pub sensitive_field: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connector_supplied_values: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomAuthConfig {
    pub authentication_type: String,
    pub auth_parameters: Vec<AuthParameter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationConfig {
    pub is_basic_auth_supported: bool,
    pub is_api_key_auth_supported: bool,
    pub is_o_auth2_supported: bool,
    pub is_custom_auth_supported: bool,
    pub custom_auth_config: Vec<CustomAuthConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConnectorRuntimeSettingDataType {
    String,
    Date,
    Datetime,
    Long,
    Integer,
    Boolean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectorRuntimeSettingScope {
    ConnectorProfile,
    Source,
    Destination,
    SourceAndDestination,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorRuntimeSetting {
    pub key: String,
    pub data_type: ConnectorRuntimeSettingDataType,
    pub required: bool,
    pub label: String,
    pub description: String,
    pub scope: ConnectorRuntimeSettingScope,
}
