//! Response envelope and error-to-status mapping.

use serde::Serialize;
use serde_json::{json, Value};
use transcript_core::{GradeServiceError, GradeValidationError};

pub const ATTENDANCE_DETAIL: &str = "Nilai tidak bisa diinput jika presensi < 75%";
pub const INVALID_GRADE_DETAIL: &str = "Grade tidak valid (A/B/C/D/E)";
pub const NOT_FOUND_DETAIL: &str = "Data tidak ditemukan";
pub const ROUTE_NOT_FOUND_DETAIL: &str = "Not Found";
pub const METHOD_NOT_ALLOWED_DETAIL: &str = "Method Not Allowed";

/// Transport-agnostic response: HTTP-equivalent status plus JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    /// 200 with any serializable body; a serialization failure becomes a 500.
    pub fn ok_json<T: Serialize>(body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(value) => Self::ok(value),
            Err(err) => Self::error(500, format!("failed to encode response: {err}")),
        }
    }

    /// Error response with a `{"detail": ...}` body.
    pub fn error(status: u16, detail: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "detail": detail.into() }),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// `detail` of an error body, if any.
    pub fn detail(&self) -> Option<&str> {
        self.body.get("detail").and_then(Value::as_str)
    }
}

impl From<&GradeServiceError> for ApiResponse {
    fn from(err: &GradeServiceError) -> Self {
        match err {
            GradeServiceError::Validation(GradeValidationError::AttendanceBelowMinimum {
                ..
            }) => Self::error(400, ATTENDANCE_DETAIL),
            GradeServiceError::Validation(GradeValidationError::InvalidLetterGrade(_)) => {
                Self::error(400, INVALID_GRADE_DETAIL)
            }
            GradeServiceError::NotFound { .. } => Self::error(404, NOT_FOUND_DETAIL),
        }
    }
}
