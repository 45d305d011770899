//! Upstream prayer-time providers.
//!
//! A provider computes the six daily timings for coordinates, a date and a timezone.
//! The astronomy itself happens upstream; adapters here only shape requests, map
//! responses to [`FetchedTimings`], and apply any provider-specific corrections.

pub mod aladhan;

use std::future::Future;

use chrono::NaiveDate;
use entity::sea_orm_active_enums::PrayerTimeSource;

use crate::{
    error::provider::ProviderError,
    model::{location::Coordinates, prayer_time::FetchedTimings},
};

/// Client computing daily timings for a location.
pub trait PrayerTimeProvider: Send + Sync {
    /// Tag stored with every record this provider produces.
    fn source(&self) -> PrayerTimeSource;

    /// Fetch the timings for `date` at `coordinates`, expressed in `timezone`.
    ///
    /// Implementations must bound the call with a timeout and return bare `HH:MM` times.
    ///
    /// # Returns
    /// - `Ok(FetchedTimings)` - Normalized timings with the provider's reported timezone
    /// - `Err(ProviderError)` - Network failure, timeout, non-success status or unusable body
    fn fetch_timings(
        &self,
        coordinates: Coordinates,
        date: NaiveDate,
        timezone: &str,
    ) -> impl Future<Output = Result<FetchedTimings, ProviderError>> + Send;
}
