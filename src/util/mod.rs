//! Utility functions shared by the provider adapters and services.
//!
//! - `time` - wall-clock normalization and calendar helpers

pub mod time;
