//! Host invocation envelope: requests in, responses out.

pub mod context;
pub mod requests;
pub mod responses;
pub mod settings;

pub use context::{
    ConnectorContext, Credentials, Entity, EntityDefinition, FieldDataType, FieldDefinition,
    QueryContext, ReadOperationProperty,
};
pub use requests::{
    ConnectorRequest, DescribeConnectorConfigurationRequest, DescribeEntityRequest,
    ListEntitiesRequest, QueryDataRequest, RetrieveDataRequest,
    ValidateConnectorRuntimeSettingsRequest, ValidateCredentialsRequest, WriteDataRequest,
};
pub use responses::{
    ConnectorResponse, DescribeConnectorConfigurationResponse, DescribeEntityResponse,
    ErrorCode, ErrorDetails, ListEntitiesResponse, QueryDataResponse, RetrieveDataResponse,
    Status, ValidateConnectorRuntimeSettingsResponse, ValidateCredentialsResponse,
    WriteDataResponse,
};
pub use settings::{
    AuthParameter, AuthenticationConfig, ConnectorMode, ConnectorRuntimeSetting,
    ConnectorRuntimeSettingDataType, ConnectorRuntimeSettingScope, CustomAuthConfig,
};
