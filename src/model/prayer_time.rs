use chrono::NaiveDate;
use entity::sea_orm_active_enums::PrayerTimeSource;
use serde::Serialize;

/// Type alias for the cached prayer-time row.
///
/// # Fields (from `entity::prayer_time::Model`)
/// - `location_key` - `"<city>"` or `"<city>/<district>"`, unique together with `date`
/// - `date` - Logical calendar date of the timings
/// - `dawn` .. `nightfall` - `HH:MM` wall-clock times in `timezone`
/// - `source` - Provider that computed the row
/// - `fetched_at` - When the row was last written by a fetch
pub type PrayerTimeModel = entity::prayer_time::Model;

/// The six daily timings, each a bare `HH:MM` string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Timings {
    pub dawn: String,
    pub sunrise: String,
    pub midday: String,
    pub afternoon: String,
    pub sunset: String,
    pub nightfall: String,
}

impl From<&PrayerTimeModel> for Timings {
    fn from(model: &PrayerTimeModel) -> Self {
        Self {
            dawn: model.dawn.clone(),
            sunrise: model.sunrise.clone(),
            midday: model.midday.clone(),
            afternoon: model.afternoon.clone(),
            sunset: model.sunset.clone(),
            nightfall: model.nightfall.clone(),
        }
    }
}

/// Normalized result of a single provider call.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedTimings {
    pub timings: Timings,
    pub date: NaiveDate,
    /// Timezone the provider reports the timings in.
    pub timezone: String,
    pub source: PrayerTimeSource,
}
