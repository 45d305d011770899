use chrono::{NaiveDate, Utc};
use migration::OnConflict;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::model::{location::LocationKey, prayer_time::FetchedTimings};

/// Persistent cache of daily prayer times, one row per location and date.
///
/// Rows are never deleted. A newer fetch for the same location and date replaces the
/// existing row in place; rows for past dates remain available as fallback data.
pub struct PrayerTimeRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PrayerTimeRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Get the row for exactly this location and date
    pub async fn get(
        &self,
        location: &LocationKey,
        date: NaiveDate,
    ) -> Result<Option<entity::prayer_time::Model>, DbErr> {
        entity::prelude::PrayerTime::find()
            .filter(entity::prayer_time::Column::LocationKey.eq(location.storage_key()))
            .filter(entity::prayer_time::Column::Date.eq(date))
            .one(self.db)
            .await
    }

    /// Get the most recent row stored for a location, regardless of date
    ///
    /// Rows are ordered by `date` and then by `fetched_at`, both descending.
    pub async fn get_last_known(
        &self,
        location: &LocationKey,
    ) -> Result<Option<entity::prayer_time::Model>, DbErr> {
        entity::prelude::PrayerTime::find()
            .filter(entity::prayer_time::Column::LocationKey.eq(location.storage_key()))
            .order_by_desc(entity::prayer_time::Column::Date)
            .order_by_desc(entity::prayer_time::Column::FetchedAt)
            .one(self.db)
            .await
    }

    /// Insert fetched timings, or replace the existing row for the same location and date
    ///
    /// A single `INSERT .. ON CONFLICT (location_key, date) DO UPDATE .. RETURNING`, so
    /// concurrent writers for the same key end with exactly one row holding the last write.
    /// `created_at` keeps the value from the first insert.
    ///
    /// # Returns
    /// The persisted row, including the authoritative `fetched_at`
    pub async fn upsert(
        &self,
        location: &LocationKey,
        fetched: FetchedTimings,
    ) -> Result<entity::prayer_time::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let timings = fetched.timings;

        let row = entity::prayer_time::ActiveModel {
            location_key: ActiveValue::Set(location.storage_key()),
            city: ActiveValue::Set(location.city().to_string()),
            district: ActiveValue::Set(location.district().map(str::to_string)),
            date: ActiveValue::Set(fetched.date),
            dawn: ActiveValue::Set(timings.dawn),
            sunrise: ActiveValue::Set(timings.sunrise),
            midday: ActiveValue::Set(timings.midday),
            afternoon: ActiveValue::Set(timings.afternoon),
            sunset: ActiveValue::Set(timings.sunset),
            nightfall: ActiveValue::Set(timings.nightfall),
            timezone: ActiveValue::Set(fetched.timezone),
            source: ActiveValue::Set(fetched.source),
            fetched_at: ActiveValue::Set(now),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        entity::prelude::PrayerTime::insert(row)
            .on_conflict(
                OnConflict::columns([
                    entity::prayer_time::Column::LocationKey,
                    entity::prayer_time::Column::Date,
                ])
                .update_columns([
                    entity::prayer_time::Column::City,
                    entity::prayer_time::Column::District,
                    entity::prayer_time::Column::Dawn,
                    entity::prayer_time::Column::Sunrise,
                    entity::prayer_time::Column::Midday,
                    entity::prayer_time::Column::Afternoon,
                    entity::prayer_time::Column::Sunset,
                    entity::prayer_time::Column::Nightfall,
                    entity::prayer_time::Column::Timezone,
                    entity::prayer_time::Column::Source,
                    entity::prayer_time::Column::FetchedAt,
                    entity::prayer_time::Column::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec_with_returning(self.db)
            .await
    }
}
