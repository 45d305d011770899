//! Daily prayer-time resolution backed by a persistent cache.
//!
//! [`service::prayer_time::PrayerTimeService`] serves cached rows, collapses concurrent
//! cache misses for one location and day into a single upstream call through a
//! [`lock::SingleFlightLock`], and falls back to the most recent cached day when the
//! upstream provider is unavailable.

pub mod config;
pub mod data;
pub mod error;
pub mod location;
pub mod lock;
pub mod model;
pub mod provider;
pub mod service;
pub mod startup;
pub mod util;
