use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::ActiveEnum;
use serde::Serialize;

use crate::model::prayer_time::{PrayerTimeModel, Timings};

/// Prayer times for one location and day as returned to callers.
///
/// `is_stale` is `true` when fresh data could not be obtained and the most recent
/// previously cached day was returned instead; `date` then names the day the timings
/// actually belong to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrayerTimesDto {
    pub city: String,
    pub district: Option<String>,
    pub date: NaiveDate,
    pub timezone: String,
    pub source: String,
    pub is_stale: bool,
    /// When the row was fetched from the provider; not part of the minimal result shape
    pub fetched_at: NaiveDateTime,
    pub timings: Timings,
}

impl PrayerTimesDto {
    pub fn from_model(model: &PrayerTimeModel, is_stale: bool) -> Self {
        Self {
            city: model.city.clone(),
            district: model.district.clone(),
            date: model.date,
            timezone: model.timezone.clone(),
            source: model.source.to_value(),
            is_stale,
            fetched_at: model.fetched_at,
            timings: Timings::from(model),
        }
    }
}

/// Outcome of an operator-triggered refresh over a range of days.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RefreshSummary {
    pub location: String,
    pub refreshed: Vec<NaiveDate>,
    pub failed: Vec<RefreshFailure>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefreshFailure {
    pub date: NaiveDate,
    pub error: String,
}
