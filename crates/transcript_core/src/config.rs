//! Grading policy configuration.
//!
//! # Responsibility
//! - Hold the thresholds and document text used by the grade service.
//! - Load overrides from JSON, defaulting any field left out.
//!
//! # Invariants
//! - Defaults reproduce the institutional rules: 75% attendance minimum,
//!   D-or-better (>= 1.0) counts toward GPA, honor tiers 3.5 / 3.0 / 2.0.
//! - Honor thresholds must be finite and strictly descending.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub const DEFAULT_MIN_ATTENDANCE: f64 = 75.0;
pub const DEFAULT_PASSING_GRADE_POINT: f64 = 1.0;
pub const DEFAULT_HEADER: &str = "TRANSKRIP AKADEMIK";
pub const DEFAULT_FOOTER: &str = "TTD Dekan - Versi Digital";
pub const DEFAULT_EMPTY_MESSAGE: &str = "Belum ada nilai";

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read grading policy: {err}"),
            Self::Parse(err) => write!(f, "failed to parse grading policy: {err}"),
            Self::Invalid(message) => write!(f, "invalid grading policy: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Lower GPA bounds (inclusive) for each honor tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HonorThresholds {
    pub cum_laude: f64,
    pub sangat_memuaskan: f64,
    pub memuaskan: f64,
}

impl Default for HonorThresholds {
    fn default() -> Self {
        Self {
            cum_laude: 3.5,
            sangat_memuaskan: 3.0,
            memuaskan: 2.0,
        }
    }
}

/// Rules applied on intake and during transcript aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradingPolicy {
    /// Minimum attendance percentage (inclusive) to accept a grade.
    pub min_attendance: f64,
    /// Minimum grade point (inclusive) for a course to count toward GPA.
    pub passing_grade_point: f64,
    pub honor_thresholds: HonorThresholds,
    pub header: String,
    pub footer: String,
    /// Message returned for a student without records.
    pub empty_message: String,
}

impl Default for GradingPolicy {
    fn default() -> Self {
        Self {
            min_attendance: DEFAULT_MIN_ATTENDANCE,
            passing_grade_point: DEFAULT_PASSING_GRADE_POINT,
            honor_thresholds: HonorThresholds::default(),
            header: DEFAULT_HEADER.to_string(),
            footer: DEFAULT_FOOTER.to_string(),
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
        }
    }
}

impl GradingPolicy {
    /// Parses a policy from JSON and validates it.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let policy: Self = serde_json::from_str(raw)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Reads and validates a JSON policy file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// # Errors
    /// - Any threshold is not finite.
    /// - Honor thresholds are not strictly descending.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.honor_thresholds;
        let numbers = [
            ("min_attendance", self.min_attendance),
            ("passing_grade_point", self.passing_grade_point),
            ("honor_thresholds.cum_laude", t.cum_laude),
            ("honor_thresholds.sangat_memuaskan", t.sangat_memuaskan),
            ("honor_thresholds.memuaskan", t.memuaskan),
        ];
        if let Some((name, value)) = numbers.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "`{name}` must be finite, got {value}"
            )));
        }

        if !(t.cum_laude > t.sangat_memuaskan && t.sangat_memuaskan > t.memuaskan) {
            return Err(ConfigError::Invalid(format!(
                "honor thresholds must be strictly descending, got {} / {} / {}",
                t.cum_laude, t.sangat_memuaskan, t.memuaskan
            )));
        }

        Ok(())
    }
}
