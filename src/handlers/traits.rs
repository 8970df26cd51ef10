//! Provider traits the router dispatches host requests to.
//!
//! Each provider owns one slice of the host contract. Implementations never
//! fail at the Rust level: every error is folded into the response's status.

use async_trait::async_trait;

use crate::types::host::{
    DescribeConnectorConfigurationRequest, DescribeConnectorConfigurationResponse,
    DescribeEntityRequest, DescribeEntityResponse, ListEntitiesRequest, ListEntitiesResponse,
    QueryDataRequest, QueryDataResponse, RetrieveDataRequest, RetrieveDataResponse,
    ValidateConnectorRuntimeSettingsRequest, ValidateConnectorRuntimeSettingsResponse,
    ValidateCredentialsRequest, ValidateCredentialsResponse, WriteDataRequest, WriteDataResponse,
};

/// Connector profile configuration: settings, credentials and the descriptor.
#[async_trait]
pub trait ConfigurationProvider: Send + Sync {
    async fn validate_connector_runtime_settings(
        &self,
        request: &ValidateConnectorRuntimeSettingsRequest,
    ) -> ValidateConnectorRuntimeSettingsResponse;

    /// Resolve and parse the referenced credentials without calling the
    /// reporting API.
    async fn validate_credentials(
        &self,
        request: &ValidateCredentialsRequest,
    ) -> ValidateCredentialsResponse;

    async fn describe_connector_configuration(
        &self,
        request: &DescribeConnectorConfigurationRequest,
    ) -> DescribeConnectorConfigurationResponse;
}

/// Entity listing and schema declaration.
#[async_trait]
pub trait SchemaProvider: Send + Sync {
    async fn list_entities(&self, request: &ListEntitiesRequest) -> ListEntitiesResponse;

    async fn describe_entity(&self, request: &DescribeEntityRequest) -> DescribeEntityResponse;
}

/// Record reads (and the rejected write path).
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn query_data(&self, request: &QueryDataRequest) -> QueryDataResponse;

    async fn retrieve_data(&self, request: &RetrieveDataRequest) -> RetrieveDataResponse;

    async fn write_data(&self, request: &WriteDataRequest) -> WriteDataResponse;
}
