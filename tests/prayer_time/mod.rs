use std::time::Duration;

use vakit::{
    location::StaticCoordinateResolver,
    lock::LocalLockRegistry,
    provider::aladhan::{AladhanConfig, AladhanProvider},
    service::prayer_time::{PrayerTimeService, ResolutionSettings},
};
use vakit_test_utils::prelude::*;

mod get_prayer_times;
mod refresh_prayer_times;

/// Real collaborators wired against the mock upstream server.
pub struct Stack {
    pub provider: AladhanProvider,
    pub resolver: StaticCoordinateResolver,
    pub lock: LocalLockRegistry,
}

impl Stack {
    pub fn new(test: &TestSetup) -> Self {
        let provider = AladhanProvider::new(AladhanConfig {
            base_url: test.server_url(),
            timeout: Duration::from_secs(2),
            ..Default::default()
        })
        .unwrap();

        Self {
            provider,
            resolver: StaticCoordinateResolver::builtin(),
            lock: LocalLockRegistry::new(),
        }
    }

    pub fn service<'a>(
        &'a self,
        test: &'a TestSetup,
    ) -> PrayerTimeService<'a, AladhanProvider, StaticCoordinateResolver, LocalLockRegistry> {
        PrayerTimeService::new(
            &test.db,
            &self.provider,
            &self.resolver,
            &self.lock,
            ResolutionSettings {
                timezone: TEST_TIMEZONE.to_string(),
                ..Default::default()
            },
        )
    }
}
