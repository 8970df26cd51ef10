//! Query pipeline for the realtime report entity.
//!
//! This module provides:
//! - Request validation (runtime settings and entity identifier)
//! - The minute-truncated reference timestamp and its clock source
//! - Report request construction, execution and row mapping
//!
//! # Pipeline
//!
//! ```text
//! QueryContext ──► validate ──► resolve credentials ──► build_report_request
//!                                                             │
//!                                                             ▼
//!            Vec<String> ◄── transform ◄── ReferenceTimestamp ◄── execute
//! ```
//!
//! The reference timestamp is read after the remote call returns and shared
//! by every row of the invocation.

pub mod clock;
pub mod error;
pub mod realtime_report;
pub mod validate;

pub use clock::{format_record_time, Clock, FixedClock, ReferenceTimestamp, SystemClock};
pub use error::ConnectorError;
pub use realtime_report::{build_report_request, execute, map_row, transform, transform_to_json};
pub use validate::{validate_entity, validate_runtime_settings, PROPERTY_ID_KEY};
