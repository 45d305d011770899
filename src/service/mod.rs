//! Business logic layer.
//!
//! [`prayer_time::PrayerTimeService`] resolves prayer times for callers: cache lookup,
//! single-flight upstream fetch, and stale fallback. [`refresh::RefreshService`] is the
//! operator path that re-fetches whole months with retries.

pub mod prayer_time;
pub mod refresh;
pub mod retry;

#[cfg(test)]
mod tests;
