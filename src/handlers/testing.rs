//! In-memory collaborators for handler tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::credentials::{CredentialError, SecretStore, ServiceAccountKey};
use crate::rpc::{ClientBuildError, RealtimeReportClient, ReportClientFactory, ReportError};
use crate::types::report::{AnalyticsRow, RunRealtimeReportRequest, RunRealtimeReportResponse};

pub const SECRET_ARN: &str = "arn:aws:secretsmanager:us-east-1:123456789012:secret:ga4";

pub const ESCAPED_PRIVATE_KEY: &str =
    "-----BEGIN\\sPRIVATE\\sKEY-----\\nMIIEabc\\n-----END\\sPRIVATE\\sKEY-----\\n";

pub struct MapStore {
    secrets: HashMap<String, String>,
    lookups: Arc<AtomicU32>,
}

impl MapStore {
    pub fn with_payload(payload: &str) -> Self {
        Self {
            secrets: HashMap::from([(SECRET_ARN.to_string(), payload.to_string())]),
            lookups: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn valid() -> Self {
        Self::with_payload(
            &serde_json::json!({
                "privateKey": ESCAPED_PRIVATE_KEY,
                "clientEmail": "reporter@demo-project.iam.gserviceaccount.com",
            })
            .to_string(),
        )
    }

    pub fn lookups(&self) -> Arc<AtomicU32> {
        self.lookups.clone()
    }
}

#[async_trait]
impl SecretStore for MapStore {
    async fn secret_string(&self, secret_id: &str) -> Result<String, CredentialError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.secrets
            .get(secret_id)
            .cloned()
            .ok_or_else(|| CredentialError::retrieval(secret_id, "ResourceNotFoundException"))
    }
}

/// Canned outcome of the remote report call.
#[derive(Clone)]
pub enum Canned {
    Rows(Vec<AnalyticsRow>, Option<i64>),
    Error { code: u16, status: String, message: String },
}

struct FakeClient {
    outcome: Canned,
    calls: Arc<AtomicU32>,
    requests: Arc<Mutex<Vec<RunRealtimeReportRequest>>>,
}

#[async_trait]
impl RealtimeReportClient for FakeClient {
    async fn run_realtime_report(
        &self,
        request: &RunRealtimeReportRequest,
    ) -> Result<RunRealtimeReportResponse, ReportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        match &self.outcome {
            Canned::Rows(rows, row_count) => Ok(RunRealtimeReportResponse {
                rows: rows.clone(),
                row_count: *row_count,
                ..Default::default()
            }),
            Canned::Error {
                code,
                status,
                message,
            } => Err(ReportError::Api {
                code: *code,
                status: status.clone(),
                message: message.clone(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SetupFailure {
    None,
    BadKey,
    Http,
}

pub struct FakeClientFactory {
    outcome: Canned,
    setup_failure: SetupFailure,
    calls: Arc<AtomicU32>,
    requests: Arc<Mutex<Vec<RunRealtimeReportRequest>>>,
    keys: Arc<Mutex<Vec<ServiceAccountKey>>>,
}

impl FakeClientFactory {
    pub fn new(outcome: Canned) -> Self {
        Self {
            outcome,
            setup_failure: SetupFailure::None,
            calls: Arc::new(AtomicU32::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            keys: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn rows(rows: Vec<AnalyticsRow>) -> Self {
        Self::new(Canned::Rows(rows, None))
    }

    pub fn empty() -> Self {
        Self::rows(Vec::new())
    }

    pub fn rejecting_keys() -> Self {
        Self {
            setup_failure: SetupFailure::BadKey,
            ..Self::empty()
        }
    }

    /// Fails client construction for a reason unrelated to the key.
    pub fn failing_setup() -> Self {
        Self {
            setup_failure: SetupFailure::Http,
            ..Self::empty()
        }
    }

    pub fn report_calls(&self) -> Arc<AtomicU32> {
        self.calls.clone()
    }

    pub fn requests(&self) -> Arc<Mutex<Vec<RunRealtimeReportRequest>>> {
        self.requests.clone()
    }

    pub fn keys(&self) -> Arc<Mutex<Vec<ServiceAccountKey>>> {
        self.keys.clone()
    }
}

impl ReportClientFactory for FakeClientFactory {
    fn create(
        &self,
        key: ServiceAccountKey,
    ) -> Result<Arc<dyn RealtimeReportClient>, ClientBuildError> {
        match self.setup_failure {
            SetupFailure::BadKey => {
                return Err(CredentialError::InvalidKey("InvalidKeyFormat".to_string()).into())
            }
            SetupFailure::Http => {
                return Err(ClientBuildError::Http("TLS backend unavailable".to_string()))
            }
            SetupFailure::None => {}
        }
        self.keys.lock().unwrap().push(key);
        Ok(Arc::new(FakeClient {
            outcome: self.outcome.clone(),
            calls: self.calls.clone(),
            requests: self.requests.clone(),
        }))
    }
}
