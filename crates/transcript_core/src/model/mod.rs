//! Domain model for grade intake, corrections and transcripts.
//!
//! # Responsibility
//! - Define typed records replacing loosely-shaped request payloads.
//! - Keep wire names of the external contract on the serde layer only.
//!
//! # Invariants
//! - Grade records are identified for retake logic by
//!   `(student_id, course_code)`; no record carries its own ID.
//! - Audit entries are immutable values.

pub mod audit;
pub mod grade;
pub mod transcript;
