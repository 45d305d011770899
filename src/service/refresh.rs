use std::time::Duration;

use crate::{
    error::Error,
    location::CoordinateResolver,
    lock::SingleFlightLock,
    model::{
        api::{RefreshFailure, RefreshSummary},
        location::LocationKey,
        prayer_time::FetchedTimings,
    },
    provider::PrayerTimeProvider,
    service::{prayer_time::PrayerTimeService, retry::RetryContext},
    util::time::days_of_month,
};

/// Operator-triggered re-fetch of whole months.
///
/// Each day is fetched and written through [`RetryContext`], so transient upstream failures
/// are retried with backoff and a fetched day is not requested again when only the write
/// failed. Does not take the single-flight lock.
pub struct RefreshService<'a, P, R, L> {
    service: &'a PrayerTimeService<'a, P, R, L>,
    max_attempts: u32,
    initial_backoff: Duration,
}

impl<'a, P, R, L> RefreshService<'a, P, R, L>
where
    P: PrayerTimeProvider,
    R: CoordinateResolver,
    L: SingleFlightLock,
{
    /// Creates a new instance of [`RefreshService`] with 3 attempts per day and 1s initial backoff
    pub fn new(service: &'a PrayerTimeService<'a, P, R, L>) -> Self {
        Self {
            service,
            max_attempts: 3,
            initial_backoff: Duration::from_secs(1),
        }
    }

    /// Override the per-day attempt limit and initial backoff
    ///
    /// `max_attempts` is clamped to at least 1.
    pub fn with_backoff(mut self, max_attempts: u32, initial_backoff: Duration) -> Self {
        self.max_attempts = max_attempts.max(1);
        self.initial_backoff = initial_backoff;
        self
    }

    /// Refresh every day of a month for a location
    ///
    /// Days that still fail after retrying are recorded in the summary instead of aborting
    /// the run.
    ///
    /// # Returns
    /// - `Ok(RefreshSummary)` - Refreshed and failed days
    /// - `Err(Error::LocationError)` - Location is invalid or has no known coordinates
    /// - `Err(Error::ParseError)` - `month` is not a valid month of `year`
    pub async fn refresh_month(
        &self,
        city: &str,
        district: Option<&str>,
        year: i32,
        month: u32,
    ) -> Result<RefreshSummary, Error> {
        let location = LocationKey::new(city, district)?;
        let days = days_of_month(year, month)?;

        let mut summary = RefreshSummary {
            location: location.to_string(),
            ..Default::default()
        };

        for date in days {
            let mut ctx: RetryContext<Option<FetchedTimings>> =
                RetryContext::new().with_backoff(self.max_attempts, self.initial_backoff);

            let description = format!("refresh of {} on {}", location, date);
            let result = ctx
                .execute_with_retry(&description, async |cache: &mut Option<FetchedTimings>| {
                    let fetched = match cache.clone() {
                        Some(fetched) => fetched,
                        None => cache
                            .insert(self.service.fetch(&location, date).await?)
                            .clone(),
                    };

                    self.service.persist(&location, fetched).await
                })
                .await;

            match result {
                Ok(_) => summary.refreshed.push(date),
                // Every remaining day would fail the same way
                Err(Error::LocationError(e)) => return Err(e.into()),
                Err(e) => summary.failed.push(RefreshFailure {
                    date,
                    error: e.to_string(),
                }),
            }
        }

        tracing::info!(
            "Refreshed {} day(s) for {} ({}-{:02}), {} failed",
            summary.refreshed.len(),
            location,
            year,
            month,
            summary.failed.len()
        );

        Ok(summary)
    }
}
