//! Host-facing request handlers.
//!
//! ```text
//! invocation JSON ──► ConnectorRouter ──┬─► ConfigurationHandler (settings, credentials)
//!                                       ├─► MetadataHandler      (entities, schema)
//!                                       └─► RecordHandler        (query pipeline)
//! ```

pub mod configuration;
pub mod metadata;
pub mod record;
pub mod router;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use configuration::ConfigurationHandler;
pub use metadata::MetadataHandler;
pub use record::RecordHandler;
pub use router::ConnectorRouter;
pub use traits::{ConfigurationProvider, QueryExecutor, SchemaProvider};
