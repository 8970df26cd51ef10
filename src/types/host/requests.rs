//! Invocation documents sent by the host.
//!
//! Every document carries a `type` tag naming the request; the router
//! dispatches on the decoded variant.

use std::collections::HashMap;

use serde::Deserialize;

use super::context::{ConnectorContext, Credentials};

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum ConnectorRequest {
    #[serde(rename = "ValidateConnectorRuntimeSettingsRequest")]
    ValidateConnectorRuntimeSettings(ValidateConnectorRuntimeSettingsRequest),
    #[serde(rename = "ValidateCredentialsRequest")]
    ValidateCredentials(ValidateCredentialsRequest),
    #[serde(rename = "DescribeConnectorConfigurationRequest")]
    DescribeConnectorConfiguration(DescribeConnectorConfigurationRequest),
    #[serde(rename = "ListEntitiesRequest")]
    ListEntities(ListEntitiesRequest),
    #[serde(rename = "DescribeEntityRequest")]
    DescribeEntity(DescribeEntityRequest),
    #[serde(rename = "QueryDataRequest")]
    QueryData(QueryDataRequest),
    #[serde(rename = "RetrieveDataRequest")]
    RetrieveData(RetrieveDataRequest),
    #[serde(rename = "WriteDataRequest")]
    WriteData(WriteDataRequest),
}

impl ConnectorRequest {
    /// Request type name, as tagged on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ValidateConnectorRuntimeSettings(_) => "ValidateConnectorRuntimeSettingsRequest",
            Self::ValidateCredentials(_) => "ValidateCredentialsRequest",
            Self::DescribeConnectorConfiguration(_) => "DescribeConnectorConfigurationRequest",
            Self::ListEntities(_) => "ListEntitiesRequest",
            Self::DescribeEntity(_) => "DescribeEntityRequest",
            Self::QueryData(_) => "QueryDataRequest",
            Self::RetrieveData(_) => "RetrieveDataRequest",
            Self::WriteData(_) => "WriteDataRequest",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateConnectorRuntimeSettingsRequest {
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub connector_runtime_settings: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateCredentialsRequest {
    #[serde(default)]
    pub connector_profile_name: Option<String>,
    #[serde(default)]
    pub credentials: Option<Credentials>,
    #[serde(default)]
    pub connector_runtime_settings: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeConnectorConfigurationRequest {
    #[serde(default)]
    pub locale: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEntitiesRequest {
    #[serde(default)]
    pub connector_context: ConnectorContext,
    #[serde(default)]
    pub entities_path: Option<String>,
    #[serde(default)]
    pub max_result: Option<u32>,
    #[serde(default)]
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeEntityRequest {
    #[serde(default)]
    pub connector_context: ConnectorContext,
    pub entity_identifier: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryDataRequest {
    #[serde(default)]
    pub connector_context: ConnectorContext,
    #[serde(default)]
    pub entity_identifier: String,
    /// Accepted for envelope compatibility; every record carries all fields.
    #[serde(default)]
    pub selected_field_names: Vec<String>,
    /// Accepted for envelope compatibility; realtime reports are not filtered.
    #[serde(default)]
    pub filter_expression: Option<String>,
    #[serde(default)]
    pub max_results: Option<u32>,
    #[serde(default)]
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveDataRequest {
    #[serde(default)]
    pub connector_context: ConnectorContext,
    #[serde(default)]
    pub entity_identifier: String,
    #[serde(default)]
    pub selected_field_names: Vec<String>,
    #[serde(default)]
    pub id_field_name: Option<String>,
    #[serde(default)]
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteDataRequest {
    #[serde(default)]
    pub connector_context: ConnectorContext,
    #[serde(default)]
    pub entity_identifier: String,
    #[serde(default)]
    pub operation: Option<String>,
    #[serde(default)]
    pub id_field_names: Vec<String>,
    #[serde(default)]
    pub records: Vec<String>,
    #[serde(default)]
    pub all_or_none: bool,
}
