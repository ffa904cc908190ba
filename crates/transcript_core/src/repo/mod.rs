//! Storage contracts and in-memory implementations.
//!
//! # Responsibility
//! - Define the data access contracts used by the grade service.
//! - Provide process-lifetime stores owned by the service instance.
//!
//! # Invariants
//! - Stores are never reset or persisted; a fresh instance is a fresh state.
//! - Repository APIs return semantic errors (`NotFound`) for missing keys.

pub mod audit_repo;
pub mod grade_repo;
