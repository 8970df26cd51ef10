//! Static schema of the single entity this connector exposes.

use crate::types::host::{
    Entity, EntityDefinition, FieldDataType, FieldDefinition, ReadOperationProperty,
};
use crate::types::record::fields;

/// Identifier of the only supported entity.
pub const RUN_REALTIME_REPORT_ENTITY: &str = "RunRealtimeReportEntity";

const EPOCH_DEFAULT: &str = "1970-01-01 00:00:00";

pub fn run_realtime_report_entity() -> Entity {
    Entity {
        entity_identifier: RUN_REALTIME_REPORT_ENTITY.to_string(),
        has_nested_entities: false,
        label: Some(RUN_REALTIME_REPORT_ENTITY.to_string()),
        description: Some(RUN_REALTIME_REPORT_ENTITY.to_string()),
    }
}

fn read_only_field(
    name: &str,
    data_type: FieldDataType,
    default_value: &str,
    is_primary_key: bool,
) -> FieldDefinition {
    let data_type_label = match data_type {
        FieldDataType::Integer => "int",
        _ => "string",
    };

    FieldDefinition {
        field_name: name.to_string(),
        data_type,
        data_type_label: Some(data_type_label.to_string()),
        label: Some(name.to_string()),
        description: Some(name.to_string()),
        default_value: Some(default_value.to_string()),
        is_primary_key,
        read_properties: Some(ReadOperationProperty {
            is_queryable: true,
            is_retrievable: true,
            is_nullable: false,
            is_timestamp_field_for_incremental_queries: false,
        }),
        write_properties: None,
    }
}

/// Field definitions, one per [`OutputRecord`](crate::types::record::OutputRecord) field.
pub fn run_realtime_report_fields() -> Vec<FieldDefinition> {
    vec![
        read_only_field(fields::DATE_TIME, FieldDataType::String, EPOCH_DEFAULT, true),
        read_only_field(
            fields::REQUEST_DATE_TIME,
            FieldDataType::String,
            EPOCH_DEFAULT,
            false,
        ),
        read_only_field(fields::COUNTRY, FieldDataType::String, "Country", false),
        read_only_field(fields::CITY, FieldDataType::String, "City", false),
        read_only_field(fields::SCREEN_PAGE_VIEWS, FieldDataType::Integer, "0", false),
        read_only_field(fields::ACTIVE_USERS, FieldDataType::Integer, "0", false),
    ]
}

pub fn run_realtime_report_definition() -> EntityDefinition {
    EntityDefinition {
        entity: run_realtime_report_entity(),
        fields: run_realtime_report_fields(),
    }
}
