//! Entity listing and schema description.

use async_trait::async_trait;

use super::traits::SchemaProvider;
use crate::transformations::ConnectorError;
use crate::types::host::{
    DescribeEntityRequest, DescribeEntityResponse, ListEntitiesRequest, ListEntitiesResponse,
    Status,
};
use crate::types::schema::{
    run_realtime_report_definition, run_realtime_report_entity, RUN_REALTIME_REPORT_ENTITY,
};

/// Serves the static schema of the realtime report entity.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataHandler;

#[async_trait]
impl SchemaProvider for MetadataHandler {
    async fn list_entities(&self, _request: &ListEntitiesRequest) -> ListEntitiesResponse {
        ListEntitiesResponse {
            status: Status::success(),
            entities: vec![run_realtime_report_entity()],
            next_token: None,
        }
    }

    async fn describe_entity(&self, request: &DescribeEntityRequest) -> DescribeEntityResponse {
        if request.entity_identifier != RUN_REALTIME_REPORT_ENTITY {
            let err = ConnectorError::unsupported_entity(&request.entity_identifier);
            tracing::warn!(error = %err, "DescribeEntity rejected");
            return DescribeEntityResponse {
                status: Status::failure(err.to_error_details()),
                entity_definition: None,
            };
        }

        DescribeEntityResponse {
            status: Status::success(),
            entity_definition: Some(run_realtime_report_definition()),
        }
    }
}
