use std::{
    collections::HashSet,
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use chrono::NaiveDate;
use entity::sea_orm_active_enums::PrayerTimeSource;
use vakit_test_utils::prelude::*;

use crate::{
    error::provider::ProviderError,
    location::StaticCoordinateResolver,
    lock::LocalLockRegistry,
    model::{
        location::Coordinates,
        prayer_time::{FetchedTimings, Timings},
    },
    provider::PrayerTimeProvider,
    service::prayer_time::{PrayerTimeService, ResolutionSettings},
};

mod prayer_time;

/// Provider double that counts calls and can be slowed down or made to fail.
struct StubProvider {
    calls: AtomicUsize,
    delay: Duration,
    timings: factory::MockTimings,
    /// Every call fails with an upstream timeout
    unavailable: bool,
    /// Number of leading calls that fail with an upstream timeout
    transient_failures: usize,
    /// Days that fail with a 400 status
    rejected_dates: HashSet<NaiveDate>,
}

impl StubProvider {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
            timings: factory::MOCK_TIMINGS,
            unavailable: false,
            transient_failures: 0,
            rejected_dates: HashSet::new(),
        }
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn with_timings(mut self, timings: factory::MockTimings) -> Self {
        self.timings = timings;
        self
    }

    fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    fn with_transient_failures(mut self, count: usize) -> Self {
        self.transient_failures = count;
        self
    }

    fn rejecting(mut self, date: NaiveDate) -> Self {
        self.rejected_dates.insert(date);
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PrayerTimeProvider for StubProvider {
    fn source(&self) -> PrayerTimeSource {
        PrayerTimeSource::Aladhan
    }

    async fn fetch_timings(
        &self,
        _coordinates: Coordinates,
        date: NaiveDate,
        timezone: &str,
    ) -> Result<FetchedTimings, ProviderError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if self.unavailable || call < self.transient_failures {
            return Err(ProviderError::Timeout("stub upstream timed out".to_string()));
        }
        if self.rejected_dates.contains(&date) {
            return Err(ProviderError::Status {
                status: 400,
                body: "bad request".to_string(),
            });
        }

        let [dawn, sunrise, midday, afternoon, sunset, nightfall] = self.timings;

        Ok(FetchedTimings {
            timings: Timings {
                dawn: dawn.to_string(),
                sunrise: sunrise.to_string(),
                midday: midday.to_string(),
                afternoon: afternoon.to_string(),
                sunset: sunset.to_string(),
                nightfall: nightfall.to_string(),
            },
            date,
            timezone: timezone.to_string(),
            source: PrayerTimeSource::Aladhan,
        })
    }
}

/// Collaborators borrowed by the service under test.
struct Harness {
    provider: StubProvider,
    resolver: StaticCoordinateResolver,
    lock: LocalLockRegistry,
    settings: ResolutionSettings,
}

impl Harness {
    fn new(provider: StubProvider) -> Self {
        Self {
            provider,
            resolver: StaticCoordinateResolver::builtin(),
            lock: LocalLockRegistry::with_poll_interval(Duration::from_millis(10)),
            settings: ResolutionSettings {
                lock_ttl: Duration::from_secs(5),
                lock_wait_timeout: Duration::from_secs(2),
                timezone: TEST_TIMEZONE.to_string(),
            },
        }
    }

    fn with_wait_timeout(mut self, timeout: Duration) -> Self {
        self.settings.lock_wait_timeout = timeout;
        self
    }

    fn service<'a>(
        &'a self,
        test: &'a TestSetup,
    ) -> PrayerTimeService<'a, StubProvider, StaticCoordinateResolver, LocalLockRegistry> {
        PrayerTimeService::new(
            &test.db,
            &self.provider,
            &self.resolver,
            &self.lock,
            self.settings.clone(),
        )
    }
}
