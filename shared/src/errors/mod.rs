//! Shared error response structure and error codes

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// Error body returned by every service when a request is rejected.
///
/// Field names are camelCase so clients of the other pension services can
/// parse it without a separate mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Numeric HTTP status, e.g. `401`
    pub http_status_code: u16,

    /// Upper-case status name, e.g. `UNAUTHORIZED`
    pub http_status: String,

    /// Machine-readable error code from [`error_codes`]
    pub reason: String,

    /// Human-readable message
    pub message: String,

    /// When the error occurred, rendered as `MM-dd-yyyy hh:mm:ss` (UTC)
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response stamped with the current time
    pub fn new(
        http_status_code: u16,
        http_status: impl Into<String>,
        reason: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            http_status_code,
            http_status: http_status.into(),
            reason: reason.into(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    /// 401 response with the given error code
    pub fn unauthorized(reason: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(401, "UNAUTHORIZED", reason, message)
    }
}

/// Common error codes used across the application
pub mod error_codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const TOKEN_EXPIRED: &str = "TOKEN_EXPIRED";
    pub const TOKEN_INVALID: &str = "TOKEN_INVALID";
}

fn serialize_timestamp<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&date.format("%m-%d-%Y %I:%M:%S").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_unauthorized_response() {
        let response = ErrorResponse::unauthorized(error_codes::TOKEN_EXPIRED, "Token expired");
        assert_eq!(response.http_status_code, 401);
        assert_eq!(response.http_status, "UNAUTHORIZED");
        assert_eq!(response.reason, "TOKEN_EXPIRED");
        assert_eq!(response.message, "Token expired");
    }

    #[test]
    fn test_serialized_shape() {
        let mut response = ErrorResponse::unauthorized(error_codes::TOKEN_INVALID, "bad token");
        response.timestamp = Utc.with_ymd_and_hms(2024, 3, 7, 14, 5, 9).unwrap();

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["httpStatusCode"], 401);
        assert_eq!(json["httpStatus"], "UNAUTHORIZED");
        assert_eq!(json["reason"], "TOKEN_INVALID");
        assert_eq!(json["message"], "bad token");
        assert_eq!(json["timestamp"], "03-07-2024 02:05:09");
    }
}
