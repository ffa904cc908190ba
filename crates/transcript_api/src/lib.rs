//! Request/response adapter for the transcript core.
//!
//! # Responsibility
//! - Expose grade intake, correction, transcript and audit operations as
//!   route-level calls that an HTTP server can forward to.
//! - Keep error semantics stable: status code plus Indonesian `detail`.

pub mod api;
pub mod response;

pub use api::{GradeApi, Method, UpdateGradeBody, APP_TITLE};
pub use response::{
    ApiResponse, ATTENDANCE_DETAIL, INVALID_GRADE_DETAIL, METHOD_NOT_ALLOWED_DETAIL,
    NOT_FOUND_DETAIL, ROUTE_NOT_FOUND_DETAIL,
};
