//! Grade use-case service.
//!
//! # Responsibility
//! - Validate and record grade submissions.
//! - Amend letter grades and write the matching audit entry.
//! - Build transcripts and expose the audit trail.
//!
//! # Invariants
//! - A record reaches the store only with attendance >= the policy minimum
//!   and a letter in `A..=E`.
//! - Amendments do not revalidate the new letter or the attendance.
//! - Every successful amendment appends exactly one audit entry; a failed one
//!   appends none.
//! - Logs carry identifiers only; names and reasons are never logged.

use crate::config::GradingPolicy;
use crate::model::audit::AuditLogEntry;
use crate::model::grade::{GradeRecord, LetterGrade};
use crate::model::transcript::Transcript;
use crate::repo::audit_repo::{AuditRepository, InMemoryAuditLog};
use crate::repo::grade_repo::{GradeRepository, InMemoryGradeRepository, RepoError};
use crate::service::transcript::compute_transcript;
use chrono::Utc;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const SUBMIT_OK_MESSAGE: &str = "Nilai berhasil diinput";
pub const AMEND_OK_MESSAGE: &str = "Update berhasil";

pub type GradeServiceResult<T> = Result<T, GradeServiceError>;

/// Intake rule violations.
#[derive(Debug, Clone, PartialEq)]
pub enum GradeValidationError {
    /// Attendance below the minimum, or not a finite number.
    AttendanceBelowMinimum { attendance: f64, minimum: f64 },
    /// Letter outside `A|B|C|D|E`.
    InvalidLetterGrade(String),
}

impl Display for GradeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AttendanceBelowMinimum {
                attendance,
                minimum,
            } => write!(
                f,
                "cannot record a grade when attendance is below {minimum}% (got {attendance}%)"
            ),
            Self::InvalidLetterGrade(value) => {
                write!(f, "invalid letter grade `{value}`; expected A|B|C|D|E")
            }
        }
    }
}

impl Error for GradeValidationError {}

/// Service error for grade use-cases.
#[derive(Debug, Clone, PartialEq)]
pub enum GradeServiceError {
    Validation(GradeValidationError),
    /// No record for `(student_id, course_code)`.
    NotFound {
        student_id: String,
        course_code: String,
    },
}

impl Display for GradeServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound {
                student_id,
                course_code,
            } => write!(
                f,
                "grade record not found: nim={student_id} course={course_code}"
            ),
        }
    }
}

impl Error for GradeServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound { .. } => None,
        }
    }
}

impl From<GradeValidationError> for GradeServiceError {
    fn from(value: GradeValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for GradeServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound {
                student_id,
                course_code,
            } => Self::NotFound {
                student_id,
                course_code,
            },
        }
    }
}

/// Confirmation returned for an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub message: &'static str,
}

/// Amendment request, mirroring the correction payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmendGradeRequest {
    pub new_letter: String,
    pub changed_by: String,
    pub reason: String,
}

/// Grade service over injected grade and audit stores.
pub struct GradeService<G: GradeRepository, A: AuditRepository> {
    grades: G,
    audit: A,
    policy: GradingPolicy,
}

impl GradeService<InMemoryGradeRepository, InMemoryAuditLog> {
    /// Service over fresh in-memory stores with the default policy.
    pub fn in_memory() -> Self {
        Self::new(
            InMemoryGradeRepository::new(),
            InMemoryAuditLog::new(),
            GradingPolicy::default(),
        )
    }
}

impl<G: GradeRepository, A: AuditRepository> GradeService<G, A> {
    pub fn new(grades: G, audit: A, policy: GradingPolicy) -> Self {
        Self {
            grades,
            audit,
            policy,
        }
    }

    pub fn policy(&self) -> &GradingPolicy {
        &self.policy
    }

    /// Read access to the grade store.
    pub fn grades(&self) -> &G {
        &self.grades
    }

    /// Checks intake rules without storing anything.
    ///
    /// Attendance is checked before the letter.
    pub fn validate_submission(&self, record: &GradeRecord) -> Result<(), GradeValidationError> {
        let minimum = self.policy.min_attendance;
        if record.attendance.is_nan() || record.attendance < minimum {
            return Err(GradeValidationError::AttendanceBelowMinimum {
                attendance: record.attendance,
                minimum,
            });
        }
        if record.letter().is_none() {
            return Err(GradeValidationError::InvalidLetterGrade(
                record.letter_grade.clone(),
            ));
        }
        Ok(())
    }

    /// Validates and appends a new grade record.
    ///
    /// # Errors
    /// - `Validation(AttendanceBelowMinimum)` when attendance is too low.
    /// - `Validation(InvalidLetterGrade)` when the letter is not `A..=E`.
    pub fn submit_grade(&mut self, record: GradeRecord) -> GradeServiceResult<SubmitReceipt> {
        if let Err(err) = self.validate_submission(&record) {
            warn!(
                "event=grade_submit module=service status=rejected nim={} course={} reason={}",
                record.student_id,
                record.course_code,
                rejection_kind(&err)
            );
            return Err(err.into());
        }

        info!(
            "event=grade_submit module=service status=ok nim={} course={} semester={} sks={}",
            record.student_id, record.course_code, record.semester, record.credits
        );
        self.grades.append(record);
        Ok(SubmitReceipt {
            message: SUBMIT_OK_MESSAGE,
        })
    }

    /// Overwrites the letter of the first matching record and audits it.
    ///
    /// The new letter is stored as given; it is not checked against the
    /// grade scale and attendance is not re-examined.
    ///
    /// # Errors
    /// - `NotFound` when no record matches; nothing is audited.
    pub fn amend_grade(
        &mut self,
        student_id: &str,
        course_code: &str,
        request: &AmendGradeRequest,
    ) -> GradeServiceResult<AuditLogEntry> {
        let old_value = match self
            .grades
            .update_grade(student_id, course_code, &request.new_letter)
        {
            Ok(previous) => previous,
            Err(err) => {
                warn!(
                    "event=grade_amend module=service status=not_found nim={student_id} course={course_code}"
                );
                return Err(err.into());
            }
        };

        if LetterGrade::parse(&request.new_letter).is_none() {
            warn!(
                "event=grade_amend module=service status=unchecked_letter nim={student_id} course={course_code}"
            );
        }

        let entry = AuditLogEntry::new(
            student_id,
            course_code,
            old_value,
            request.new_letter.clone(),
            request.changed_by.clone(),
            Utc::now(),
            request.reason.clone(),
        );
        self.audit.record(entry.clone());

        info!(
            "event=grade_amend module=service status=ok nim={} course={} old={} new={} audit_id={}",
            entry.student_id, entry.course_code, entry.old_value, entry.new_value, entry.id
        );
        Ok(entry)
    }

    /// Builds the transcript for a student. Never fails.
    pub fn build_transcript(&self, student_id: &str) -> Transcript {
        let records = self.grades.find_all(student_id);
        let transcript = compute_transcript(student_id, &records, &self.policy);

        match &transcript {
            Transcript::Full(doc) => info!(
                "event=transcript_build module=service status=ok nim={} attempts={} counted={} total_sks={} ipk={}",
                student_id,
                records.len(),
                doc.records.len(),
                doc.summary.total_sks,
                doc.summary.ipk
            ),
            Transcript::Empty(_) => {
                info!("event=transcript_build module=service status=empty nim={student_id}")
            }
        }
        transcript
    }

    /// Full audit trail in insertion order.
    pub fn list_audit_logs(&self) -> Vec<AuditLogEntry> {
        self.audit.list_all()
    }
}

fn rejection_kind(err: &GradeValidationError) -> &'static str {
    match err {
        GradeValidationError::AttendanceBelowMinimum { .. } => "attendance",
        GradeValidationError::InvalidLetterGrade(_) => "letter",
    }
}
