//! Record handler: runs the realtime report query pipeline.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::Instrument;

use super::traits::QueryExecutor;
use crate::credentials::{resolve_service_account, SecretStore};
use crate::rpc::ReportClientFactory;
use crate::transformations::{
    build_report_request, execute, transform_to_json, validate_entity, validate_runtime_settings,
    Clock, ConnectorError, ReferenceTimestamp,
};
use crate::types::host::{
    ErrorCode, ErrorDetails, QueryContext, QueryDataRequest, QueryDataResponse,
    RetrieveDataRequest, RetrieveDataResponse, Status, WriteDataRequest, WriteDataResponse,
};
use crate::types::schema::RUN_REALTIME_REPORT_ENTITY;

pub struct RecordHandler {
    secrets: Arc<dyn SecretStore>,
    clients: Arc<dyn ReportClientFactory>,
    clock: Arc<dyn Clock>,
    token_uri: String,
}

impl RecordHandler {
    pub fn new(
        secrets: Arc<dyn SecretStore>,
        clients: Arc<dyn ReportClientFactory>,
        clock: Arc<dyn Clock>,
        token_uri: impl Into<String>,
    ) -> Self {
        Self {
            secrets,
            clients,
            clock,
            token_uri: token_uri.into(),
        }
    }

    /// Validate, resolve credentials, query, then map every row against one
    /// reference timestamp.
    async fn run_query(&self, context: QueryContext<'_>) -> Result<Vec<String>, ConnectorError> {
        let property_id = validate_runtime_settings(&context)?;
        validate_entity(&context, RUN_REALTIME_REPORT_ENTITY)?;

        let key =
            resolve_service_account(self.secrets.as_ref(), context.secret_arn, &self.token_uri)
                .await?;
        let client = self.clients.create(key)?;

        let report_request = build_report_request(property_id);
        let response = execute(client.as_ref(), &report_request).await?;

        let reference = ReferenceTimestamp::capture(self.clock.as_ref());
        let records = transform_to_json(&response.rows, reference)?;

        tracing::info!(
            property = report_request.property.as_str(),
            reference = %reference.format(),
            records = records.len(),
            "Realtime report mapped"
        );

        Ok(records)
    }
}

#[async_trait]
impl QueryExecutor for RecordHandler {
    async fn query_data(&self, request: &QueryDataRequest) -> QueryDataResponse {
        let context = QueryContext::new(&request.connector_context, &request.entity_identifier);
        let span = tracing::info_span!("query_data", entity = context.entity_identifier);

        async move {
            match self.run_query(context).await {
                Ok(records) => QueryDataResponse {
                    status: Status::success(),
                    records,
                    next_token: None,
                },
                Err(e) => {
                    let details = e.to_error_details();
                    tracing::error!(
                        error = %e,
                        error_code = ?details.error_code,
                        "QueryData request failed"
                    );
                    QueryDataResponse {
                        status: Status::failure(details),
                        records: Vec::new(),
                        next_token: None,
                    }
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn retrieve_data(&self, request: &RetrieveDataRequest) -> RetrieveDataResponse {
        tracing::debug!(
            entity = request.entity_identifier.as_str(),
            ids = request.ids.len(),
            "RetrieveData is not supported; returning no records"
        );
        RetrieveDataResponse {
            status: Status::success(),
            records: Vec::new(),
        }
    }

    async fn write_data(&self, request: &WriteDataRequest) -> WriteDataResponse {
        tracing::warn!(
            entity = request.entity_identifier.as_str(),
            records = request.records.len(),
            "WriteData rejected"
        );
        WriteDataResponse {
            status: Status::failure(ErrorDetails::new(
                ErrorCode::InvalidArgument,
                "This connector is source-only and does not support writes",
            )),
            write_record_results: Vec::new(),
        }
    }
}
