//! Shared domain types.
//!
//! - `location` - validated location keys and coordinates
//! - `prayer_time` - the six daily timings and the provider's fetch result
//! - `api` - the response shape handed to callers of the orchestrator

pub mod api;
pub mod location;
pub mod prayer_time;
