//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into grade intake, correction and transcript APIs.
//! - Keep adapter layers decoupled from storage details.

pub mod grade_service;
pub mod transcript;
