//! Append-only audit log for grade corrections.

use crate::model::audit::AuditLogEntry;

/// Ordered, append-only audit storage. No filtering, deletion or bound.
pub trait AuditRepository {
    fn record(&mut self, entry: AuditLogEntry);
    fn list_all(&self) -> Vec<AuditLogEntry>;
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryAuditLog {
    entries: Vec<AuditLogEntry>,
}

impl InMemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AuditRepository for InMemoryAuditLog {
    fn record(&mut self, entry: AuditLogEntry) {
        self.entries.push(entry);
    }

    fn list_all(&self) -> Vec<AuditLogEntry> {
        self.entries.clone()
    }
}
