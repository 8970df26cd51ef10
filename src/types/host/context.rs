//! Connector context and metadata types shared by host requests and responses.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Reference to the credentials the host stored for a connector profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// ARN of the secret holding the custom auth parameters.
    pub secret_arn: String,
    #[serde(default)]
    pub authentication_type: Option<String>,
}

/// Per-invocation context supplied by the host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorContext {
    #[serde(default)]
    pub connector_runtime_settings: HashMap<String, String>,
    #[serde(default)]
    pub credentials: Option<Credentials>,
    #[serde(default)]
    pub entity_definition: Option<EntityDefinition>,
    #[serde(default)]
    pub api_version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub entity_identifier: String,
    #[serde(default)]
    pub has_nested_entities: bool,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDefinition {
    pub entity: Entity,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldDataType {
    String,
    Integer,
    Double,
    Boolean,
    Date,
    DateTime,
    Struct,
    List,
}

/// Read-side properties of a field (used when the connector is a source).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadOperationProperty {
    pub is_queryable: bool,
    pub is_retrievable: bool,
    pub is_nullable: bool,
    pub is_timestamp_field_for_incremental_queries: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub field_name: String,
    pub data_type: FieldDataType,
    #[serde(default)]
    pub data_type_label: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub is_primary_key: bool,
    #[serde(default)]
    pub read_properties: Option<ReadOperationProperty>,
    /// Always absent: the connector has no write path.
    #[serde(default)]
    pub write_properties: Option<serde_json::Value>,
}

/// Read-only view of the inputs the query pipeline needs.
///
/// Borrowed from the host request; the pipeline never mutates it.
#[derive(Debug, Clone, Copy)]
pub struct QueryContext<'a> {
    pub runtime_settings: &'a HashMap<String, String>,
    pub entity_identifier: &'a str,
    pub secret_arn: Option<&'a str>,
}

impl<'a> QueryContext<'a> {
    /// Build the view from a connector context.
    ///
    /// The entity named by the context's entity definition wins over the
    /// request-level identifier when both are present.
    pub fn new(context: &'a ConnectorContext, request_entity: &'a str) -> Self {
        let entity_identifier = context
            .entity_definition
            .as_ref()
            .map(|def| def.entity.entity_identifier.as_str())
            .unwrap_or(request_entity);

        Self {
            runtime_settings: &context.connector_runtime_settings,
            entity_identifier,
            secret_arn: context.credentials.as_ref().map(|c| c.secret_arn.as_str()),
        }
    }

    pub fn setting(&self, key: &str) -> Option<&'a str> {
        self.runtime_settings.get(key).map(String::as_str)
    }
}
