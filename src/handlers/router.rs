//! Dispatches decoded host requests to the provider that owns them.

use std::sync::Arc;

use super::traits::{ConfigurationProvider, QueryExecutor, SchemaProvider};
use crate::types::host::{ConnectorRequest, ConnectorResponse, ErrorCode, ErrorDetails, Status};

/// Router over the three providers, built once at startup.
#[derive(Clone)]
pub struct ConnectorRouter {
    configuration: Arc<dyn ConfigurationProvider>,
    schema: Arc<dyn SchemaProvider>,
    records: Arc<dyn QueryExecutor>,
}

impl ConnectorRouter {
    pub fn new(
        configuration: Arc<dyn ConfigurationProvider>,
        schema: Arc<dyn SchemaProvider>,
        records: Arc<dyn QueryExecutor>,
    ) -> Self {
        Self {
            configuration,
            schema,
            records,
        }
    }

    pub async fn handle(&self, request: &ConnectorRequest) -> ConnectorResponse {
        tracing::debug!(request_type = request.kind(), "Dispatching request");

        match request {
            ConnectorRequest::ValidateConnectorRuntimeSettings(r) => {
                ConnectorResponse::ValidateConnectorRuntimeSettings(
                    self.configuration.validate_connector_runtime_settings(r).await,
                )
            }
            ConnectorRequest::ValidateCredentials(r) => ConnectorResponse::ValidateCredentials(
                self.configuration.validate_credentials(r).await,
            ),
            ConnectorRequest::DescribeConnectorConfiguration(r) => {
                ConnectorResponse::DescribeConnectorConfiguration(Box::new(
                    self.configuration.describe_connector_configuration(r).await,
                ))
            }
            ConnectorRequest::ListEntities(r) => {
                ConnectorResponse::ListEntities(self.schema.list_entities(r).await)
            }
            ConnectorRequest::DescribeEntity(r) => {
                ConnectorResponse::DescribeEntity(self.schema.describe_entity(r).await)
            }
            ConnectorRequest::QueryData(r) => {
                ConnectorResponse::QueryData(self.records.query_data(r).await)
            }
            ConnectorRequest::RetrieveData(r) => {
                ConnectorResponse::RetrieveData(self.records.retrieve_data(r).await)
            }
            ConnectorRequest::WriteData(r) => {
                ConnectorResponse::WriteData(self.records.write_data(r).await)
            }
        }
    }

    /// Decode a raw invocation document and dispatch it.
    ///
    /// Undecodable input yields an `InvalidArgument` failure.
    pub async fn handle_json(&self, document: &str) -> ConnectorResponse {
        match serde_json::from_str::<ConnectorRequest>(document) {
            Ok(request) => self.handle(&request).await,
            Err(e) => {
                tracing::error!(error = %e, "Failed to decode invocation");
                ConnectorResponse::Failure(Status::failure(ErrorDetails::new(
                    ErrorCode::InvalidArgument,
                    format!("Invalid request document: {}", e),
                )))
            }
        }
    }
}
