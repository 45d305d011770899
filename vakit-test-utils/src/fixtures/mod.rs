//! Test fixture modules for database rows and mock upstream endpoints.
//!
//! - `prayer_time` - cached prayer-time rows and the mocked aladhan timings endpoint

pub mod prayer_time;
