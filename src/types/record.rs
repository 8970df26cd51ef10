//! Output record emitted for each realtime report row.

use serde::{Deserialize, Serialize};

/// Field names shared by the output record and the entity schema.
///
/// The schema described to the host and the JSON written per record must
/// agree on these names exactly (case-sensitive).
pub mod fields {
    pub const REQUEST_DATE_TIME: &str = "RequestDateTime";
    pub const DATE_TIME: &str = "DateTime";
    pub const COUNTRY: &str = "Country";
    pub const CITY: &str = "City";
    pub const SCREEN_PAGE_VIEWS: &str = "ScreenPageViews";
    pub const ACTIVE_USERS: &str = "ActiveUsers";

    /// All fields in serialization order.
    pub const ALL: [&str; 6] = [
        REQUEST_DATE_TIME,
        DATE_TIME,
        COUNTRY,
        CITY,
        SCREEN_PAGE_VIEWS,
        ACTIVE_USERS,
    ];
}

/// Minute-granularity timestamp format used for both time fields.
pub const RECORD_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:00";

/// One record of the `RunRealtimeReportEntity`.
///
/// Metric values are kept as the strings returned by the API so the remote
/// numeric representation passes through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    /// When the report was requested (the invocation's reference timestamp).
    #[serde(rename = "RequestDateTime")]
    pub request_date_time: String,
    /// Absolute event time. Primary key.
    #[serde(rename = "DateTime")]
    pub date_time: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "ScreenPageViews")]
    pub screen_page_views: String,
    #[serde(rename = "ActiveUsers")]
    pub active_users: String,
}

impl OutputRecord {
    /// Serialize into the self-contained JSON text handed to the host.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokyo() -> OutputRecord {
        OutputRecord {
            request_date_time: "2024-01-01 00:10:00".to_string(),
            date_time: "2024-01-01 00:05:00".to_string(),
            country: "JP".to_string(),
            city: "Tokyo".to_string(),
            screen_page_views: "10".to_string(),
            active_users: "3".to_string(),
        }
    }

    #[test]
    fn test_serialized_keys_follow_field_order() {
        let json = tokyo().to_json().unwrap();
        assert_eq!(
            json,
            r#"{"RequestDateTime":"2024-01-01 00:10:00","DateTime":"2024-01-01 00:05:00","Country":"JP","City":"Tokyo","ScreenPageViews":"10","ActiveUsers":"3"}"#
        );
    }

    #[test]
    fn test_parse_back_preserves_values() {
        let record = tokyo();
        let parsed = OutputRecord::from_json(&record.to_json().unwrap()).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_key_set_matches_field_constants() {
        let value: serde_json::Value = serde_json::from_str(&tokyo().to_json().unwrap()).unwrap();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        let mut expected = fields::ALL.to_vec();
        expected.sort_unstable();
        let mut actual = keys.clone();
        actual.sort_unstable();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_non_ascii_values_pass_through() {
        let mut record = tokyo();
        record.city = "東京".to_string();
        let parsed = OutputRecord::from_json(&record.to_json().unwrap()).unwrap();
        assert_eq!(parsed.city, "東京");
    }
}
