//! Wire types of the Analytics Data API `runRealtimeReport` method.

use serde::{Deserialize, Serialize};

pub const DIMENSION_MINUTES_AGO: &str = "minutesAgo";
pub const DIMENSION_COUNTRY: &str = "country";
pub const DIMENSION_CITY: &str = "city";
pub const METRIC_SCREEN_PAGE_VIEWS: &str = "screenPageViews";
pub const METRIC_ACTIVE_USERS: &str = "activeUsers";

/// Largest row limit the API accepts for a single report.
pub const MAX_REPORT_ROWS: i64 = 100_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionOrderBy {
    pub dimension_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBy {
    pub dimension: DimensionOrderBy,
    pub desc: bool,
}

/// Body of a realtime report request.
///
/// `property` (`properties/{id}`) is part of the request path, not the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRealtimeReportRequest {
    #[serde(skip)]
    pub property: String,
    pub dimensions: Vec<Dimension>,
    pub metrics: Vec<Metric>,
    pub order_bys: Vec<OrderBy>,
    pub limit: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportValue {
    #[serde(default)]
    pub value: String,
}

/// One row of a realtime report: dimension values then metric values, each
/// in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsRow {
    #[serde(default)]
    pub dimension_values: Vec<ReportValue>,
    #[serde(default)]
    pub metric_values: Vec<ReportValue>,
}

impl AnalyticsRow {
    pub fn from_values(dimensions: &[&str], metrics: &[&str]) -> Self {
        let wrap = |values: &[&str]| {
            values
                .iter()
                .map(|v| ReportValue {
                    value: v.to_string(),
                })
                .collect()
        };
        Self {
            dimension_values: wrap(dimensions),
            metric_values: wrap(metrics),
        }
    }

    pub fn dimension(&self, index: usize) -> Option<&str> {
        self.dimension_values.get(index).map(|v| v.value.as_str())
    }

    pub fn metric(&self, index: usize) -> Option<&str> {
        self.metric_values.get(index).map(|v| v.value.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderName {
    pub name: String,
}

/// Response of `runRealtimeReport`. Empty reports omit `rows` entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRealtimeReportResponse {
    #[serde(default)]
    pub dimension_headers: Vec<HeaderName>,
    #[serde(default)]
    pub metric_headers: Vec<HeaderName>,
    #[serde(default)]
    pub rows: Vec<AnalyticsRow>,
    /// Total rows matching the query, regardless of the request limit.
    #[serde(default)]
    pub row_count: Option<i64>,
    #[serde(default)]
    pub kind: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let request = RunRealtimeReportRequest {
            property: "properties/1".to_string(),
            dimensions: vec![Dimension {
                name: DIMENSION_MINUTES_AGO.to_string(),
            }],
            metrics: vec![Metric {
                name: METRIC_ACTIVE_USERS.to_string(),
            }],
            order_bys: vec![OrderBy {
                dimension: DimensionOrderBy {
                    dimension_name: DIMENSION_MINUTES_AGO.to_string(),
                },
                desc: false,
            }],
            limit: MAX_REPORT_ROWS,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "dimensions": [{ "name": "minutesAgo" }],
                "metrics": [{ "name": "activeUsers" }],
                "orderBys": [{ "dimension": { "dimensionName": "minutesAgo" }, "desc": false }],
                "limit": 100000
            })
        );
    }

    #[test]
    fn test_response_without_rows() {
        let response: RunRealtimeReportResponse = serde_json::from_str(
            r#"{ "dimensionHeaders": [{ "name": "minutesAgo" }], "kind": "analyticsData#runRealtimeReport" }"#,
        )
        .unwrap();
        assert!(response.rows.is_empty());
        assert_eq!(response.row_count, None);
    }

    #[test]
    fn test_response_rows_keep_order() {
        let response: RunRealtimeReportResponse = serde_json::from_str(
            r#"{
                "rows": [
                    {
                        "dimensionValues": [
                            { "value": "00" }, { "value": "Japan" }, { "value": "Osaka" }
                        ],
                        "metricValues": [{ "value": "4" }, { "value": "2" }]
                    },
                    {
                        "dimensionValues": [
                            { "value": "03" }, { "value": "Japan" }, { "value": "Tokyo" }
                        ],
                        "metricValues": [{ "value": "12" }, { "value": "7" }]
                    }
                ],
                "rowCount": 2
            }"#,
        )
        .unwrap();

        assert_eq!(response.rows.len(), 2);
        assert_eq!(response.rows[0].dimension(2), Some("Osaka"));
        assert_eq!(response.rows[1].dimension(0), Some("03"));
        assert_eq!(response.rows[1].metric(1), Some("7"));
        assert_eq!(response.row_count, Some(2));
    }
}
