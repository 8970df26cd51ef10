//! Request validation run before any credential lookup or remote call.

use super::error::ConnectorError;
use crate::types::host::QueryContext;

/// Runtime setting holding the GA4 property id.
pub const PROPERTY_ID_KEY: &str = "propertyId";

/// Ensure the property id runtime setting is present and return it.
pub fn validate_runtime_settings<'a>(
    context: &QueryContext<'a>,
) -> Result<&'a str, ConnectorError> {
    context
        .setting(PROPERTY_ID_KEY)
        .ok_or_else(|| ConnectorError::missing_setting(PROPERTY_ID_KEY))
}

/// Ensure the requested entity is exactly `expected_entity_id`.
pub fn validate_entity(
    context: &QueryContext<'_>,
    expected_entity_id: &str,
) -> Result<(), ConnectorError> {
    if context.entity_identifier == expected_entity_id {
        Ok(())
    } else {
        Err(ConnectorError::unsupported_entity(context.entity_identifier))
    }
}
