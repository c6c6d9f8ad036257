//! Method-filtering reverse proxy for JSON-RPC 2.0 traffic.
//!
//! Accepts JSON-RPC requests over HTTP POST, checks the requested method
//! against a static allow-list, and forwards permitted requests to a single
//! backend RPC server, relaying the backend's response verbatim.

pub mod allowlist;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod rpc;

pub use allowlist::AllowList;
pub use config::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
