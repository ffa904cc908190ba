//! Grade store contract and in-memory implementation.
//!
//! # Responsibility
//! - Keep grade records in insertion order for the lifetime of the owner.
//! - Resolve the first matching record for `(student_id, course_code)`.
//!
//! # Invariants
//! - `append` never deduplicates; retakes are separate records.
//! - `update_grade` mutates only the first matching record.
//! - Records are never removed.

use crate::model::grade::GradeRecord;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for grade store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    NotFound {
        student_id: String,
        course_code: String,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
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

impl Error for RepoError {}

/// Ordered storage for grade records.
pub trait GradeRepository {
    /// Appends a record at the end of the sequence.
    fn append(&mut self, record: GradeRecord);
    /// All records of a student, retakes included, in insertion order.
    fn find_all(&self, student_id: &str) -> Vec<GradeRecord>;
    /// First record matching the key.
    fn find_one(&self, student_id: &str, course_code: &str) -> Option<GradeRecord>;
    /// Overwrites the letter of the first matching record and returns the
    /// previous letter.
    fn update_grade(
        &mut self,
        student_id: &str,
        course_code: &str,
        new_letter: &str,
    ) -> RepoResult<String>;
    /// Number of stored records across all students.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-lifetime grade store backed by a `Vec`.
#[derive(Debug, Default, Clone)]
pub struct InMemoryGradeRepository {
    records: Vec<GradeRecord>,
}

impl InMemoryGradeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GradeRepository for InMemoryGradeRepository {
    fn append(&mut self, record: GradeRecord) {
        self.records.push(record);
    }

    fn find_all(&self, student_id: &str) -> Vec<GradeRecord> {
        self.records
            .iter()
            .filter(|record| record.student_id == student_id)
            .cloned()
            .collect()
    }

    fn find_one(&self, student_id: &str, course_code: &str) -> Option<GradeRecord> {
        self.records
            .iter()
            .find(|record| record.matches(student_id, course_code))
            .cloned()
    }

    fn update_grade(
        &mut self,
        student_id: &str,
        course_code: &str,
        new_letter: &str,
    ) -> RepoResult<String> {
        let record = self
            .records
            .iter_mut()
            .find(|record| record.matches(student_id, course_code))
            .ok_or_else(|| RepoError::NotFound {
                student_id: student_id.to_string(),
                course_code: course_code.to_string(),
            })?;

        Ok(std::mem::replace(
            &mut record.letter_grade,
            new_letter.to_string(),
        ))
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
