//! HTTP controller endpoints.
//!
//! Handlers validate inputs, call into the service layer, and map results
//! to HTTP responses. The surface is intentionally small: a health probe
//! for monitoring and a capability-guarded status route.

pub mod status;
pub mod structure;
