use std::time::Duration;

use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

use crate::{
    data::prayer_time::PrayerTimeRepository,
    error::{location::LocationError, Error},
    location::CoordinateResolver,
    lock::SingleFlightLock,
    model::{
        api::PrayerTimesDto,
        location::LocationKey,
        prayer_time::{FetchedTimings, PrayerTimeModel},
    },
    provider::PrayerTimeProvider,
    util::time::days_of_month,
};

/// Lock and provider parameters for [`PrayerTimeService`].
#[derive(Debug, Clone)]
pub struct ResolutionSettings {
    /// Lifetime of a single-flight lock before it expires on its own
    pub lock_ttl: Duration,
    /// How long a caller waits for another caller's fetch; shorter than `lock_ttl`
    pub lock_wait_timeout: Duration,
    /// IANA timezone the provider computes timings in
    pub timezone: String,
}

impl Default for ResolutionSettings {
    fn default() -> Self {
        Self {
            lock_ttl: Duration::from_secs(15),
            lock_wait_timeout: Duration::from_secs(10),
            timezone: "Europe/Istanbul".to_string(),
        }
    }
}

pub struct PrayerTimeService<'a, P, R, L> {
    db: &'a DatabaseConnection,
    provider: &'a P,
    resolver: &'a R,
    lock: &'a L,
    settings: ResolutionSettings,
}

impl<'a, P, R, L> PrayerTimeService<'a, P, R, L>
where
    P: PrayerTimeProvider,
    R: CoordinateResolver,
    L: SingleFlightLock,
{
    /// Creates a new instance of [`PrayerTimeService`]
    pub fn new(
        db: &'a DatabaseConnection,
        provider: &'a P,
        resolver: &'a R,
        lock: &'a L,
        settings: ResolutionSettings,
    ) -> Self {
        Self {
            db,
            provider,
            resolver,
            lock,
            settings,
        }
    }

    /// Resolve prayer times for a location and day
    ///
    /// Serves the cached row when present. On a miss, exactly one caller per location and
    /// day fetches from the provider while concurrent callers wait for it and re-read the
    /// cache. If no fresh data can be obtained the most recent cached day for the location
    /// is returned with `is_stale` set.
    ///
    /// # Returns
    /// - `Ok(PrayerTimesDto)` - Fresh or stale timings
    /// - `Err(Error::LocationError)` - Invalid location, or unknown location with nothing cached
    /// - `Err(Error::NoDataAvailable)` - Fresh data unavailable and nothing cached for the location
    /// - `Err(Error::DbErr)` - The cache could not be read
    pub async fn get_prayer_times(
        &self,
        city: &str,
        district: Option<&str>,
        date: NaiveDate,
    ) -> Result<PrayerTimesDto, Error> {
        let location = LocationKey::new(city, district)?;
        let prayer_time_repo = PrayerTimeRepository::new(self.db);

        if let Some(cached) = prayer_time_repo.get(&location, date).await? {
            tracing::debug!("Cache hit for {} on {}", location, date);

            return Ok(PrayerTimesDto::from_model(&cached, false));
        }

        match self.resolve_miss(&location, date).await {
            Ok(Some(fresh)) => Ok(PrayerTimesDto::from_model(&fresh, false)),
            Ok(None) => {
                self.fallback(&location, date, "lock released without a cached row".into())
                    .await
            }
            Err(e) => self.fallback(&location, date, e.into()).await,
        }
    }

    /// Fetch and store fresh prayer times, bypassing the cache and the single-flight lock
    ///
    /// Used by the operator refresh path, which owns its own retry handling.
    pub async fn refresh_prayer_times(
        &self,
        city: &str,
        district: Option<&str>,
        date: NaiveDate,
    ) -> Result<PrayerTimesDto, Error> {
        let location = LocationKey::new(city, district)?;

        let fetched = self.fetch(&location, date).await?;
        let model = self.persist(&location, fetched).await?;

        Ok(PrayerTimesDto::from_model(&model, false))
    }

    /// Resolve every day of a month, one day at a time
    ///
    /// # Returns
    /// - `Ok(Vec<PrayerTimesDto>)` - One entry per day in calendar order
    /// - `Err(Error::ParseError)` - `month` is not a valid month of `year`
    /// - `Err(Error)` - The first day that failed to resolve
    pub async fn get_month(
        &self,
        city: &str,
        district: Option<&str>,
        year: i32,
        month: u32,
    ) -> Result<Vec<PrayerTimesDto>, Error> {
        let days = days_of_month(year, month)?;

        let mut results = Vec::with_capacity(days.len());
        for date in days {
            results.push(self.get_prayer_times(city, district, date).await?);
        }

        Ok(results)
    }

    /// Resolve coordinates and fetch timings from the provider
    pub async fn fetch(
        &self,
        location: &LocationKey,
        date: NaiveDate,
    ) -> Result<FetchedTimings, Error> {
        let coordinates = self.resolver.resolve(location)?;

        tracing::info!(
            "Fetching prayer times for {} on {} from {:?}",
            location,
            date,
            self.provider.source()
        );

        let fetched = self
            .provider
            .fetch_timings(coordinates, date, &self.settings.timezone)
            .await?;

        Ok(fetched)
    }

    /// Write fetched timings to the cache, replacing any existing row for the same day
    pub async fn persist(
        &self,
        location: &LocationKey,
        fetched: FetchedTimings,
    ) -> Result<PrayerTimeModel, Error> {
        let prayer_time_repo = PrayerTimeRepository::new(self.db);

        let model = prayer_time_repo.upsert(location, fetched).await?;

        Ok(model)
    }

    /// Cache-miss path: fetch under the lock, or wait for whoever holds it
    ///
    /// `Ok(None)` means the lock holder finished without leaving a row behind. The lock guard
    /// lives on this future, so a caller dropping it mid-fetch releases the lock.
    async fn resolve_miss(
        &self,
        location: &LocationKey,
        date: NaiveDate,
    ) -> Result<Option<PrayerTimeModel>, Error> {
        let lock_key = location.lock_key(date);

        if let Some(guard) = self
            .lock
            .try_acquire(&lock_key, self.settings.lock_ttl)
            .await?
        {
            tracing::debug!("Acquired lock {}", lock_key);

            let result = self.fetch_under_lock(location, date).await;

            if let Err(e) = self.lock.release(guard).await {
                // Expires on its own after the TTL
                tracing::warn!("Failed to release lock {}: {}", lock_key, e);
            }

            return result.map(Some);
        }

        tracing::debug!("Lock {} is held, waiting for release", lock_key);

        self.lock
            .wait_for_release(&lock_key, self.settings.lock_wait_timeout)
            .await?;

        let prayer_time_repo = PrayerTimeRepository::new(self.db);

        Ok(prayer_time_repo.get(location, date).await?)
    }

    async fn fetch_under_lock(
        &self,
        location: &LocationKey,
        date: NaiveDate,
    ) -> Result<PrayerTimeModel, Error> {
        let prayer_time_repo = PrayerTimeRepository::new(self.db);

        // Another caller may have written the row between our miss and our acquire
        if let Some(cached) = prayer_time_repo.get(location, date).await? {
            return Ok(cached);
        }

        let fetched = self.fetch(location, date).await?;

        self.persist(location, fetched).await
    }

    /// Serve the most recent cached day for the location in place of fresh data
    async fn fallback(
        &self,
        location: &LocationKey,
        date: NaiveDate,
        reason: FallbackReason,
    ) -> Result<PrayerTimesDto, Error> {
        let prayer_time_repo = PrayerTimeRepository::new(self.db);

        if let Some(stale) = prayer_time_repo.get_last_known(location).await? {
            tracing::warn!(
                "Serving stale prayer times for {} on {} from {}: {}",
                location,
                date,
                stale.date,
                reason
            );

            return Ok(PrayerTimesDto::from_model(&stale, true));
        }

        match reason {
            FallbackReason::Error(Error::LocationError(e @ LocationError::NotFound(_))) => {
                tracing::error!("Unknown location {} with nothing cached", location);

                Err(e.into())
            }
            reason => {
                tracing::error!(
                    "No prayer times available for {} on {}: {}",
                    location,
                    date,
                    reason
                );

                Err(Error::NoDataAvailable {
                    location: location.to_string(),
                    date,
                })
            }
        }
    }
}

/// Why fresh data could not be served.
enum FallbackReason {
    Error(Error),
    Message(&'static str),
}

impl From<Error> for FallbackReason {
    fn from(e: Error) -> Self {
        Self::Error(e)
    }
}

impl From<&'static str> for FallbackReason {
    fn from(message: &'static str) -> Self {
        Self::Message(message)
    }
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error(e) => write!(f, "{}", e),
            Self::Message(message) => f.write_str(message),
        }
    }
}
