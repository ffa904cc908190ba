//! Core domain logic for the academic transcript system.
//! This crate is the single source of truth for grading rules.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, GradingPolicy, HonorThresholds};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::audit::AuditLogEntry;
pub use model::grade::{grade_point_of, mutu, GradeRecord, LetterGrade, UnknownLetterGrade};
pub use model::transcript::{
    Biodata, EmptyTranscript, Predikat, Transcript, TranscriptDocument, TranscriptSummary,
};
pub use repo::audit_repo::{AuditRepository, InMemoryAuditLog};
pub use repo::grade_repo::{GradeRepository, InMemoryGradeRepository, RepoError, RepoResult};
pub use service::grade_service::{
    AmendGradeRequest, GradeService, GradeServiceError, GradeServiceResult, GradeValidationError,
    SubmitReceipt, AMEND_OK_MESSAGE, SUBMIT_OK_MESSAGE,
};

/// Minimal health-check API for adapter smoke tests.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
