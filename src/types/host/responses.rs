//! Response documents returned to the host.

use std::collections::HashMap;

use serde::Serialize;

use super::context::{Entity, EntityDefinition};
use super::settings::{AuthenticationConfig, ConnectorMode, ConnectorRuntimeSetting};

/// Error codes understood by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    InvalidArgument,
    InvalidCredentials,
    AccessDenied,
    RateLimitExceeded,
    ServiceQuotaExceeded,
    ConnectorTimeout,
    ClientError,
    ServerError,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
    pub error_code: ErrorCode,
    pub error_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_seconds: Option<u32>,
}

impl ErrorDetails {
    pub fn new(error_code: ErrorCode, error_message: impl Into<String>) -> Self {
        Self {
            error_code,
            error_message: error_message.into(),
            retry_after_seconds: None,
        }
    }
}

/// Success flag plus optional error, shared by every response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub is_success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_details: Option<ErrorDetails>,
}

impl Status {
    pub fn success() -> Self {
        Self {
            is_success: true,
            error_details: None,
        }
    }

    pub fn failure(details: ErrorDetails) -> Self {
        Self {
            is_success: false,
            error_details: Some(details),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateConnectorRuntimeSettingsResponse {
    #[serde(flatten)]
    pub status: Status,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub errors_by_field: HashMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateCredentialsResponse {
    #[serde(flatten)]
    pub status: Status,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeConnectorConfigurationResponse {
    #[serde(flatten)]
    pub status: Status,
    pub connector_owner: String,
    pub connector_name: String,
    pub connector_version: String,
    pub connector_modes: Vec<ConnectorMode>,
    pub authentication_config: AuthenticationConfig,
    pub connector_runtime_setting: Vec<ConnectorRuntimeSetting>,
    pub supported_api_versions: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEntitiesResponse {
    #[serde(flatten)]
    pub status: Status,
    pub entities: Vec<Entity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeEntityResponse {
    #[serde(flatten)]
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_definition: Option<EntityDefinition>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryDataResponse {
    #[serde(flatten)]
    pub status: Status,
    /// One JSON object per record, in remote row order.
    pub records: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveDataResponse {
    #[serde(flatten)]
    pub status: Status,
    pub records: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteDataResponse {
    #[serde(flatten)]
    pub status: Status,
    pub write_record_results: Vec<serde_json::Value>,
}

/// Any response the router can produce.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ConnectorResponse {
    ValidateConnectorRuntimeSettings(ValidateConnectorRuntimeSettingsResponse),
    ValidateCredentials(ValidateCredentialsResponse),
    DescribeConnectorConfiguration(Box<DescribeConnectorConfigurationResponse>),
    ListEntities(ListEntitiesResponse),
    DescribeEntity(DescribeEntityResponse),
    QueryData(QueryDataResponse),
    RetrieveData(RetrieveDataResponse),
    WriteData(WriteDataResponse),
    /// Returned when the invocation document could not be decoded.
    Failure(Status),
}

impl ConnectorResponse {
    pub fn status(&self) -> &Status {
        match self {
            Self::ValidateConnectorRuntimeSettings(r) => &r.status,
            Self::ValidateCredentials(r) => &r.status,
            Self::DescribeConnectorConfiguration(r) => &r.status,
            Self::ListEntities(r) => &r.status,
            Self::DescribeEntity(r) => &r.status,
            Self::QueryData(r) => &r.status,
            Self::RetrieveData(r) => &r.status,
            Self::WriteData(r) => &r.status,
            Self::Failure(status) => status,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status().is_success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_serialization() {
        let response = QueryDataResponse {
            status: Status::failure(ErrorDetails::new(
                ErrorCode::InvalidArgument,
                "propertyId should be provided as runtime setting",
            )),
            records: Vec::new(),
            next_token: None,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "isSuccess": false,
                "errorDetails": {
                    "errorCode": "InvalidArgument",
                    "errorMessage": "propertyId should be provided as runtime setting"
                },
                "records": []
            })
        );
    }

    #[test]
    fn test_success_omits_error_details() {
        let response = ConnectorResponse::QueryData(QueryDataResponse {
            status: Status::success(),
            records: vec!["{}".to_string()],
            next_token: None,
        });
        assert!(response.is_success());
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value, serde_json::json!({ "isSuccess": true, "records": ["{}"] }));
    }
}
