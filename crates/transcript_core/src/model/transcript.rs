//! Transcript result shapes.
//!
//! # Responsibility
//! - Define the structured transcript returned for one student.
//! - Define the honor classification (predikat) derived from GPA.
//!
//! # Invariants
//! - A student without records yields `Transcript::Empty`, never an error.
//! - `TranscriptSummary::ipk` is rounded to 2 decimal places; the predikat is
//!   classified from the unrounded value.

use crate::model::grade::GradeRecord;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Honor classification derived from GPA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Predikat {
    #[serde(rename = "Cum Laude")]
    CumLaude,
    /// Very satisfactory.
    #[serde(rename = "Sangat Memuaskan")]
    SangatMemuaskan,
    /// Satisfactory.
    #[serde(rename = "Memuaskan")]
    Memuaskan,
    /// Sufficient.
    #[serde(rename = "Cukup")]
    Cukup,
}

impl Predikat {
    pub fn label(self) -> &'static str {
        match self {
            Self::CumLaude => "Cum Laude",
            Self::SangatMemuaskan => "Sangat Memuaskan",
            Self::Memuaskan => "Memuaskan",
            Self::Cukup => "Cukup",
        }
    }
}

impl Display for Predikat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Student identity printed on the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Biodata {
    #[serde(rename = "NIM")]
    pub nim: String,
    #[serde(rename = "Nama")]
    pub nama: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSummary {
    /// Sum of credit units over counted courses.
    pub total_sks: u64,
    /// GPA (IPK), rounded to 2 decimal places.
    pub ipk: f64,
    pub predikat: Predikat,
}

/// Full transcript for a student with at least one grade record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptDocument {
    pub header: String,
    pub biodata: Biodata,
    /// Best attempt per course, passing courses only, in first-seen order.
    pub records: Vec<GradeRecord>,
    pub summary: TranscriptSummary,
    pub footer: String,
}

/// Placeholder returned when a student has no grade records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmptyTranscript {
    pub nim: String,
    pub ipk: f64,
    pub message: String,
}

/// Transcript lookup result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Transcript {
    Full(TranscriptDocument),
    Empty(EmptyTranscript),
}

impl Transcript {
    pub fn nim(&self) -> &str {
        match self {
            Self::Full(doc) => &doc.biodata.nim,
            Self::Empty(empty) => &empty.nim,
        }
    }

    /// Rounded GPA; 0.0 for an empty transcript.
    pub fn ipk(&self) -> f64 {
        match self {
            Self::Full(doc) => doc.summary.ipk,
            Self::Empty(empty) => empty.ipk,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty(_))
    }

    pub fn as_document(&self) -> Option<&TranscriptDocument> {
        match self {
            Self::Full(doc) => Some(doc),
            Self::Empty(_) => None,
        }
    }
}
