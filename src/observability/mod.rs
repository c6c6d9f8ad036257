//! Logging and audit trail.
//!
//! # Responsibilities
//! - Initialize the tracing pipeline (stderr + optional log file)
//! - Record audit events for rejected methods through an injectable sink

pub mod audit;
pub mod logging;

pub use audit::{AuditSink, TracingAudit};
