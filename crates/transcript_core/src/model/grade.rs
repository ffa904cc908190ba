//! Grade record domain model.
//!
//! # Responsibility
//! - Define the canonical grade entry submitted for one course attempt.
//! - Own the fixed letter-grade to grade-point mapping.
//!
//! # Invariants
//! - `(student_id, course_code)` identifies a course attempt group; retakes
//!   share the key and are kept as separate records.
//! - Grade records are never deleted.
//! - `letter_grade` is validated on intake only, so a stored value may fall
//!   outside `A..=E` after an amendment. Such values are worth 0.0 points.
//!
//! # See also
//! - crate::service::grade_service

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Fixed letter grade scale accepted on intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
    E,
}

impl LetterGrade {
    /// All accepted letters, best first.
    pub const ALL: [LetterGrade; 5] = [
        LetterGrade::A,
        LetterGrade::B,
        LetterGrade::C,
        LetterGrade::D,
        LetterGrade::E,
    ];

    /// Grade-point value of this letter. No partial credit.
    pub fn grade_point(self) -> f64 {
        match self {
            Self::A => 4.0,
            Self::B => 3.0,
            Self::C => 2.0,
            Self::D => 1.0,
            Self::E => 0.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
        }
    }

    /// Parses an exact, case-sensitive letter.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            "D" => Some(Self::D),
            "E" => Some(Self::E),
            _ => None,
        }
    }
}

impl Display for LetterGrade {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of `A|B|C|D|E`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLetterGrade(pub String);

impl Display for UnknownLetterGrade {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown letter grade `{}`; expected A|B|C|D|E", self.0)
    }
}

impl std::error::Error for UnknownLetterGrade {}

impl FromStr for LetterGrade {
    type Err = UnknownLetterGrade;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownLetterGrade(s.to_string()))
    }
}

/// Grade-point value of a stored letter; letters outside the scale count as 0.0.
pub fn grade_point_of(letter: &str) -> f64 {
    LetterGrade::parse(letter).map_or(0.0, LetterGrade::grade_point)
}

/// Weighted grade points ("mutu") for one course: credits times grade point.
pub fn mutu(credits: u32, letter: &str) -> f64 {
    f64::from(credits) * grade_point_of(letter)
}

/// One graded course attempt for a student.
///
/// Serialized with the intake wire names (`nim`, `kode_mk`, `sks`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRecord {
    /// Student identification number (NIM).
    #[serde(rename = "nim")]
    pub student_id: String,
    #[serde(rename = "nama")]
    pub student_name: String,
    #[serde(rename = "kode_mk")]
    pub course_code: String,
    #[serde(rename = "nama_mk")]
    pub course_name: String,
    /// Credit units (SKS).
    #[serde(rename = "sks")]
    pub credits: u32,
    pub semester: u32,
    /// Raw letter as stored. Intake requires `A..=E`; amendments do not.
    #[serde(rename = "nilai_huruf")]
    pub letter_grade: String,
    /// Attendance percentage, 0 to 100.
    #[serde(rename = "presensi")]
    pub attendance: f64,
}

impl GradeRecord {
    /// Parsed letter, or `None` when the stored value is outside the scale.
    pub fn letter(&self) -> Option<LetterGrade> {
        LetterGrade::parse(&self.letter_grade)
    }

    pub fn grade_point(&self) -> f64 {
        grade_point_of(&self.letter_grade)
    }

    pub fn mutu(&self) -> f64 {
        mutu(self.credits, &self.letter_grade)
    }

    pub fn matches(&self, student_id: &str, course_code: &str) -> bool {
        self.student_id == student_id && self.course_code == course_code
    }
}
