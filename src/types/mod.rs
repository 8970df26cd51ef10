pub mod config;
pub mod host;
pub mod record;
pub mod report;
pub mod schema;
