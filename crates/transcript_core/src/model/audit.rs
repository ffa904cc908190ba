//! Grade correction audit entry.
//!
//! # Invariants
//! - Entries are only created as a side effect of a grade amendment.
//! - Entries are immutable once created; the log is append-only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Record of one letter-grade correction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// Stable ID of this correction.
    pub id: Uuid,
    #[serde(rename = "nim")]
    pub student_id: String,
    #[serde(rename = "kode_mk")]
    pub course_code: String,
    /// Letter grade before the correction.
    pub old_value: String,
    /// Letter grade after the correction, stored as given.
    pub new_value: String,
    /// Actor identifier supplied by the caller.
    pub changed_by: String,
    /// Serialized as RFC 3339 / ISO-8601.
    pub changed_at: DateTime<Utc>,
    pub reason: String,
}

impl AuditLogEntry {
    /// Builds a new entry with a fresh ID.
    pub fn new(
        student_id: impl Into<String>,
        course_code: impl Into<String>,
        old_value: impl Into<String>,
        new_value: impl Into<String>,
        changed_by: impl Into<String>,
        changed_at: DateTime<Utc>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            student_id: student_id.into(),
            course_code: course_code.into(),
            old_value: old_value.into(),
            new_value: new_value.into(),
            changed_by: changed_by.into(),
            changed_at,
            reason: reason.into(),
        }
    }
}
