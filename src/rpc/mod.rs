mod analytics;
mod auth;
#[cfg(test)]
mod mock_server;
mod rpc;

pub use analytics::{
    realtime_report_url, AnalyticsClientConfig, AnalyticsClientFactory, AnalyticsDataClient,
};
pub use auth::{ServiceAccountTokenSource, ANALYTICS_READONLY_SCOPE};
pub use rpc::{
    error_chain, with_retry, ClientBuildError, RealtimeReportClient, ReportClientFactory,
    ReportError, RetryConfig,
};
