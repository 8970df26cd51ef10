//! Realtime report request construction and row-to-record mapping.

use super::clock::{format_record_time, ReferenceTimestamp};
use super::error::ConnectorError;
use crate::rpc::RealtimeReportClient;
use crate::types::record::OutputRecord;
use crate::types::report::{
    AnalyticsRow, Dimension, DimensionOrderBy, Metric, OrderBy, RunRealtimeReportRequest,
    RunRealtimeReportResponse, DIMENSION_CITY, DIMENSION_COUNTRY, DIMENSION_MINUTES_AGO,
    MAX_REPORT_ROWS, METRIC_ACTIVE_USERS, METRIC_SCREEN_PAGE_VIEWS,
};

const DIMENSIONS: [&str; 3] = [DIMENSION_MINUTES_AGO, DIMENSION_COUNTRY, DIMENSION_CITY];
const METRICS: [&str; 2] = [METRIC_SCREEN_PAGE_VIEWS, METRIC_ACTIVE_USERS];

/// Build the fixed realtime report query for `property_id`.
///
/// Rows are ordered by ascending `minutesAgo`, so the most recent minute comes
/// first. The row limit is the API maximum; anything beyond it is dropped by
/// the API without notice.
pub fn build_report_request(property_id: &str) -> RunRealtimeReportRequest {
    RunRealtimeReportRequest {
        property: format!("properties/{}", property_id),
        dimensions: DIMENSIONS
            .iter()
            .map(|name| Dimension {
                name: name.to_string(),
            })
            .collect(),
        metrics: METRICS
            .iter()
            .map(|name| Metric {
                name: name.to_string(),
            })
            .collect(),
        order_bys: vec![OrderBy {
            dimension: DimensionOrderBy {
                dimension_name: DIMENSION_MINUTES_AGO.to_string(),
            },
            desc: false,
        }],
        limit: MAX_REPORT_ROWS,
    }
}

/// Run the report. Remote failures propagate untouched.
pub async fn execute(
    client: &dyn RealtimeReportClient,
    request: &RunRealtimeReportRequest,
) -> Result<RunRealtimeReportResponse, ConnectorError> {
    let response = client.run_realtime_report(request).await?;

    if let Some(total) = response.row_count {
        if total > response.rows.len() as i64 {
            tracing::warn!(
                property = request.property.as_str(),
                total_rows = total,
                returned_rows = response.rows.len(),
                "Realtime report truncated at the row limit"
            );
        }
    }

    Ok(response)
}

fn parse_offset(raw: &str) -> Option<u32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Map one row onto an output record anchored at `reference`.
pub fn map_row(
    row_index: usize,
    row: &AnalyticsRow,
    reference: ReferenceTimestamp,
) -> Result<OutputRecord, ConnectorError> {
    let dimension = |i: usize| {
        row.dimension(i).ok_or_else(|| {
            ConnectorError::malformed_row(
                row_index,
                format!("missing dimension '{}'", DIMENSIONS[i]),
            )
        })
    };
    let metric = |i: usize| {
        row.metric(i).ok_or_else(|| {
            ConnectorError::malformed_row(row_index, format!("missing metric '{}'", METRICS[i]))
        })
    };

    let minutes_ago = dimension(0)?;
    let offset = parse_offset(minutes_ago).ok_or_else(|| {
        ConnectorError::malformed_row(
            row_index,
            format!("minutesAgo '{}' is not a non-negative integer", minutes_ago),
        )
    })?;

    Ok(OutputRecord {
        request_date_time: reference.format(),
        date_time: format_record_time(reference.minus_minutes(offset)),
        country: dimension(1)?.to_string(),
        city: dimension(2)?.to_string(),
        screen_page_views: metric(0)?.to_string(),
        active_users: metric(1)?.to_string(),
    })
}

/// Map every row, in order. The first malformed row aborts the whole batch.
pub fn transform(
    rows: &[AnalyticsRow],
    reference: ReferenceTimestamp,
) -> Result<Vec<OutputRecord>, ConnectorError> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| map_row(i, row, reference))
        .collect()
}

/// Map and serialize every row into the JSON strings returned to the host.
pub fn transform_to_json(
    rows: &[AnalyticsRow],
    reference: ReferenceTimestamp,
) -> Result<Vec<String>, ConnectorError> {
    transform(rows, reference)?
        .iter()
        .map(|record| record.to_json().map_err(ConnectorError::from))
        .collect()
}
