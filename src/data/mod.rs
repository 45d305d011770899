//! Data access layer repositories.
//!
//! Repositories wrap sea-orm queries for the prayer-time cache table. They are generic over
//! `ConnectionTrait`, so callers can pass either a connection or a transaction.

pub mod prayer_time;
