//! Request-level API over the grade service.
//!
//! # Responsibility
//! - Route `(method, path, body)` requests to grade service operations.
//! - Decode JSON bodies and map service errors to status + Indonesian detail.
//!
//! # Invariants
//! - Every service call runs under one mutex; callers on many threads are
//!   serialized here, not in core.
//! - Handlers never panic; a poisoned lock is recovered, since every service
//!   operation leaves the stores consistent before returning.

use crate::response::{ApiResponse, METHOD_NOT_ALLOWED_DETAIL, ROUTE_NOT_FOUND_DETAIL};
use log::{debug, warn};
use serde::Deserialize;
use serde_json::json;
use std::borrow::Cow;
use std::sync::{Mutex, MutexGuard, PoisonError};
use transcript_core::{
    AmendGradeRequest, AuditRepository, GradeRecord, GradeRepository, GradeService,
    InMemoryAuditLog, InMemoryGradeRepository, AMEND_OK_MESSAGE,
};

pub const APP_TITLE: &str = "Sistem Transkrip Akademik";

/// Request method subset used by the grade routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl Method {
    /// Parses an HTTP method name, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "GET" => Some(Self::Get),
            "POST" => Some(Self::Post),
            "PUT" => Some(Self::Put),
            _ => None,
        }
    }
}

/// Correction payload for `PUT /grades/{nim}/{kode_mk}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateGradeBody {
    pub nilai_huruf: String,
    pub changed_by: String,
    pub reason: String,
}

impl From<UpdateGradeBody> for AmendGradeRequest {
    fn from(body: UpdateGradeBody) -> Self {
        Self {
            new_letter: body.nilai_huruf,
            changed_by: body.changed_by,
            reason: body.reason,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Route<'a> {
    Health,
    Grades,
    Grade {
        nim: Cow<'a, str>,
        kode_mk: Cow<'a, str>,
    },
    Transcript {
        nim: Cow<'a, str>,
    },
    AuditLogs,
}

impl<'a> Route<'a> {
    /// Matches a request path; the query string is ignored and one trailing
    /// slash is allowed. Segments are percent-decoded; an empty interior
    /// segment or a segment that is not UTF-8 after decoding matches nothing.
    fn parse(path: &'a str) -> Option<Self> {
        let path = path.split('?').next().unwrap_or_default();
        let path = path.strip_prefix('/').unwrap_or(path);
        let path = path.strip_suffix('/').unwrap_or(path);
        if path.is_empty() {
            return None;
        }

        let segments = path
            .split('/')
            .map(|raw| match urlencoding::decode(raw) {
                Ok(segment) if !segment.is_empty() => Some(segment),
                _ => None,
            })
            .collect::<Option<Vec<Cow<'a, str>>>>()?;

        match segments.as_slice() {
            [head] if head == "health" => Some(Self::Health),
            [head] if head == "grades" => Some(Self::Grades),
            [head, nim, kode_mk] if head == "grades" => Some(Self::Grade {
                nim: nim.clone(),
                kode_mk: kode_mk.clone(),
            }),
            [head, nim] if head == "transcript" => Some(Self::Transcript { nim: nim.clone() }),
            [head] if head == "audit-logs" => Some(Self::AuditLogs),
            _ => None,
        }
    }

    fn allows(&self, method: Method) -> bool {
        match self {
            Self::Health | Self::Transcript { .. } | Self::AuditLogs => method == Method::Get,
            Self::Grades => method == Method::Post,
            Self::Grade { .. } => method == Method::Put,
        }
    }
}

/// Thread-safe API facade owning one grade service.
pub struct GradeApi<G: GradeRepository, A: AuditRepository> {
    service: Mutex<GradeService<G, A>>,
}

impl GradeApi<InMemoryGradeRepository, InMemoryAuditLog> {
    /// API over a fresh in-memory service with the default policy.
    pub fn in_memory() -> Self {
        Self::new(GradeService::in_memory())
    }
}

impl<G: GradeRepository, A: AuditRepository> GradeApi<G, A> {
    pub fn new(service: GradeService<G, A>) -> Self {
        Self {
            service: Mutex::new(service),
        }
    }

    /// Dispatches one request by method and path.
    pub fn handle(&self, method: Method, path: &str, body: &str) -> ApiResponse {
        let Some(route) = Route::parse(path) else {
            debug!("event=api_route module=api status=not_found path={path}");
            return ApiResponse::error(404, ROUTE_NOT_FOUND_DETAIL);
        };
        if !route.allows(method) {
            debug!("event=api_route module=api status=method_not_allowed path={path}");
            return ApiResponse::error(405, METHOD_NOT_ALLOWED_DETAIL);
        }

        match route {
            Route::Health => self.health(),
            Route::Grades => self.post_grade(body),
            Route::Grade { nim, kode_mk } => self.put_grade(&nim, &kode_mk, body),
            Route::Transcript { nim } => self.get_transcript(&nim),
            Route::AuditLogs => self.get_audit_logs(),
        }
    }

    pub fn health(&self) -> ApiResponse {
        ApiResponse::ok(json!({
            "status": "success",
            "message": format!("{APP_TITLE} is running"),
        }))
    }

    /// `POST /grades/`: grade intake.
    pub fn post_grade(&self, body: &str) -> ApiResponse {
        let record: GradeRecord = match decode(body) {
            Ok(record) => record,
            Err(response) => return response,
        };

        match self.lock().submit_grade(record) {
            Ok(receipt) => ApiResponse::ok(json!({ "message": receipt.message })),
            Err(err) => ApiResponse::from(&err),
        }
    }

    /// `PUT /grades/{nim}/{kode_mk}`: grade correction.
    pub fn put_grade(&self, nim: &str, kode_mk: &str, body: &str) -> ApiResponse {
        let update: UpdateGradeBody = match decode(body) {
            Ok(update) => update,
            Err(response) => return response,
        };
        let request = AmendGradeRequest::from(update);

        match self.lock().amend_grade(nim, kode_mk, &request) {
            Ok(entry) => ApiResponse::ok(json!({
                "message": AMEND_OK_MESSAGE,
                "audit_log": entry,
            })),
            Err(err) => ApiResponse::from(&err),
        }
    }

    /// `GET /transcript/{nim}`: always 200.
    pub fn get_transcript(&self, nim: &str) -> ApiResponse {
        let transcript = self.lock().build_transcript(nim);
        ApiResponse::ok_json(&transcript)
    }

    /// `GET /audit-logs`: full, unfiltered trail.
    pub fn get_audit_logs(&self) -> ApiResponse {
        let logs = self.lock().list_audit_logs();
        ApiResponse::ok_json(&logs)
    }

    fn lock(&self) -> MutexGuard<'_, GradeService<G, A>> {
        self.service.lock().unwrap_or_else(|poisoned| {
            warn!("event=api_lock module=api status=recovered_poisoned");
            PoisonError::into_inner(poisoned)
        })
    }
}

fn decode<T: for<'de> Deserialize<'de>>(body: &str) -> Result<T, ApiResponse> {
    serde_json::from_str(body).map_err(|err| {
        debug!("event=api_decode module=api status=error");
        ApiResponse::error(422, err.to_string())
    })
}
