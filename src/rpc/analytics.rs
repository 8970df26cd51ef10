//! HTTP client for the Analytics Data API.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::credentials::ServiceAccountKey;
use crate::rpc::auth::ServiceAccountTokenSource;
use crate::rpc::rpc::{
    with_retry, ClientBuildError, RealtimeReportClient, ReportClientFactory, ReportError,
    RetryConfig,
};
use crate::types::config::connector::ConnectorConfig;
use crate::types::report::{RunRealtimeReportRequest, RunRealtimeReportResponse};

const API_VERSION_PATH: &str = "v1beta";
const PROPERTY_COLLECTION: &str = "properties";

#[derive(Debug, Clone)]
pub struct AnalyticsClientConfig {
    pub base_url: Url,
    pub timeout: Duration,
    pub retry: RetryConfig,
}

impl AnalyticsClientConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(30),
            retry: RetryConfig::default(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, config: RetryConfig) -> Self {
        self.retry = config;
        self
    }
}

impl From<&ConnectorConfig> for AnalyticsClientConfig {
    fn from(config: &ConnectorConfig) -> Self {
        Self::new(config.analytics_base_url.clone())
            .with_timeout(config.request_timeout())
            .with_retry(config.retry.to_retry_config())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: u16,
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

/// Parse an API error document, falling back to the raw body.
fn api_error(http_status: u16, body: &str) -> ReportError {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) => ReportError::Api {
            code: envelope.error.code,
            status: envelope.error.status,
            message: envelope.error.message,
        },
        Err(_) => ReportError::Api {
            code: http_status,
            status: String::new(),
            message: body.to_string(),
        },
    }
}

/// Authenticated client for one service account.
#[derive(Debug)]
pub struct AnalyticsDataClient {
    http: reqwest::Client,
    config: AnalyticsClientConfig,
    tokens: ServiceAccountTokenSource,
}

impl AnalyticsDataClient {
    pub fn new(
        key: &ServiceAccountKey,
        config: AnalyticsClientConfig,
    ) -> Result<Self, ClientBuildError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| ClientBuildError::Http(e.to_string()))?;
        let tokens = ServiceAccountTokenSource::new(key, http.clone(), config.retry.clone())?;

        Ok(Self {
            http,
            config,
            tokens,
        })
    }

    /// `{base}/v1beta/{property}:runRealtimeReport`
    pub fn realtime_report_url(&self, property: &str) -> Result<Url, ReportError> {
        realtime_report_url(&self.config.base_url, property)
    }

    async fn post_report(
        &self,
        url: &Url,
        token: &str,
        request: &RunRealtimeReportRequest,
    ) -> Result<RunRealtimeReportResponse, ReportError> {
        let response = self
            .http
            .post(url.clone())
            .bearer_auth(token)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<RunRealtimeReportResponse>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        Err(api_error(status.as_u16(), &body))
    }
}

/// Append `v1beta/properties/{id}:runRealtimeReport` to the base path.
///
/// The id is pushed as a single percent-encoded segment, so it can never add
/// path segments, a query or a fragment. Base paths keep their last segment
/// with or without a trailing slash.
pub fn realtime_report_url(base_url: &Url, property: &str) -> Result<Url, ReportError> {
    let property_id = property
        .strip_prefix(PROPERTY_COLLECTION)
        .and_then(|rest| rest.strip_prefix('/'))
        .filter(|id| !id.is_empty())
        .ok_or_else(|| {
            ReportError::InvalidUrl(format!("'{}' is not a property resource name", property))
        })?;

    let mut url = base_url.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|_| ReportError::InvalidUrl(format!("'{}' cannot be a base URL", base_url)))?
        .pop_if_empty()
        .push(API_VERSION_PATH)
        .push(PROPERTY_COLLECTION)
        .push(&format!("{}:runRealtimeReport", property_id));
    Ok(url)
}

#[async_trait]
impl RealtimeReportClient for AnalyticsDataClient {
    async fn run_realtime_report(
        &self,
        request: &RunRealtimeReportRequest,
    ) -> Result<RunRealtimeReportResponse, ReportError> {
        let url = self.realtime_report_url(&request.property)?;
        let token = self.tokens.access_token().await?;

        let op_name = format!("runRealtimeReport({})", request.property);
        with_retry(&self.config.retry, &op_name, || {
            self.post_report(&url, &token, request)
        })
        .await
    }
}

/// Builds [`AnalyticsDataClient`]s sharing one endpoint configuration.
#[derive(Debug, Clone)]
pub struct AnalyticsClientFactory {
    config: AnalyticsClientConfig,
}

impl AnalyticsClientFactory {
    pub fn new(config: AnalyticsClientConfig) -> Self {
        Self { config }
    }
}

impl ReportClientFactory for AnalyticsClientFactory {
    fn create(
        &self,
        key: ServiceAccountKey,
    ) -> Result<Arc<dyn RealtimeReportClient>, ClientBuildError> {
        let client = AnalyticsDataClient::new(&key, self.config.clone())?;
        Ok(Arc::new(client))
    }
}
