//! Audit trail for filtered requests.
//!
//! Every request rejected for a disallowed method must leave a record. The
//! sink is a trait so tests can capture rejections without scraping log
//! output; production uses the tracing pipeline.

/// Destination for method-rejection audit events.
pub trait AuditSink: Send + Sync {
    /// Record a request whose method was not on the allow-list.
    ///
    /// `payload` is the raw request body as received, for forensics.
    fn record_rejection(&self, method: &str, payload: &str);
}

/// Default sink that writes rejections into the tracing pipeline.
#[derive(Debug, Default)]
pub struct TracingAudit;

impl AuditSink for TracingAudit {
    fn record_rejection(&self, method: &str, payload: &str) {
        tracing::error!(
            target: "audit",
            method = %method,
            payload = %payload,
            "filtered request for disallowed method"
        );
    }
}
