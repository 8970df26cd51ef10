//! Realtime report source connector for the Google Analytics 4 Data API.
//!
//! The host sends one JSON invocation document per request; [`handlers::ConnectorRouter`]
//! decodes it and returns the matching response document.

pub mod credentials;
pub mod handlers;
pub mod rpc;
pub mod transformations;
pub mod types;
