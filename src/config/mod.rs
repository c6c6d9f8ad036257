//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! CLI flags + optional config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → passed by value into the HTTP server at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no runtime reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{AllowListConfig, BackendConfig, ListenerConfig, LogConfig, ProxyConfig};
pub use validation::{validate_config, ValidationError};
