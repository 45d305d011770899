use crate::TestSetup;

pub mod data;
pub mod factory;
pub mod mockito;

impl TestSetup {
    pub fn prayer_time<'a>(&'a mut self) -> PrayerTimeFixtures<'a> {
        PrayerTimeFixtures { setup: self }
    }
}

pub struct PrayerTimeFixtures<'a> {
    pub setup: &'a mut TestSetup,
}
