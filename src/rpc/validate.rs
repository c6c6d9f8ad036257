//! Inbound request validation.
//!
//! # Responsibilities
//! - Parse the raw body as JSON
//! - Check the envelope carries both `id` and `method`
//! - Check `method` against the allow-list
//!
//! # Design Decisions
//! - Validation is a pure function over the body bytes and the allow-list;
//!   side effects (audit logging, HTTP responses) are the caller's job
//! - A well-formed JSON body without `id`/`method` is treated as a
//!   notification and answered with an empty 200, not an error
//! - `params` and `jsonrpc` fields are carried through opaquely

use serde_json::Value;

use crate::allowlist::AllowList;

/// Outcome of validating one inbound request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// Envelope is well-formed and the method is permitted; the parsed
    /// content is forwarded to the backend as-is.
    Forward(Value),

    /// Body was not valid JSON.
    InvalidJson,

    /// Valid JSON but missing `id` or `method`; answered silently.
    Notification,

    /// Method is not on the allow-list.
    MethodNotAllowed {
        /// Request `id`, echoed in the error response.
        id: Value,
        /// The rejected method, for the audit trail.
        method: String,
    },
}

/// Validate a raw request body against the allow-list.
pub fn validate(body: &[u8], allowlist: &AllowList) -> Validation {
    let content: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(_) => return Validation::InvalidJson,
    };

    let Some(object) = content.as_object() else {
        // Scalars and arrays cannot carry the required keys.
        return Validation::Notification;
    };

    if !object.contains_key("id") || !object.contains_key("method") {
        return Validation::Notification;
    }

    let method = &object["method"];
    let permitted = method.as_str().is_some_and(|m| allowlist.contains(m));
    if !permitted {
        // A non-string method can never match the allow-list; report it
        // in serialized form so the audit entry stays meaningful.
        let name = match method.as_str() {
            Some(s) => s.to_owned(),
            None => method.to_string(),
        };
        return Validation::MethodNotAllowed {
            id: object["id"].clone(),
            method: name,
        };
    }

    Validation::Forward(content)
}
