//! JSON-RPC 2.0 protocol handling.
//!
//! # Data Flow
//! ```text
//! raw request body bytes
//!     → validate.rs (parse, envelope checks, allow-list check)
//!     → Validation::Forward(content)  → handed to the forwarder
//!     → Validation::{InvalidJson, Notification, MethodNotAllowed}
//!          → envelope.rs builds the terminal JSON-RPC error response
//! ```

pub mod envelope;
pub mod validate;

pub use envelope::RpcErrorResponse;
pub use validate::{validate, Validation};
