//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, POST / route)
//!     → request.rs (attach request ID)
//!     → rpc::validate (envelope + allow-list checks)
//!     → server.rs forwarder (single POST to the backend)
//!     → relay backend body verbatim, or JSON-RPC error envelope
//! ```

pub mod request;
pub mod server;

pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
