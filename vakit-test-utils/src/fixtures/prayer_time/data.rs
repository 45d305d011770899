//! Database fixtures for cached prayer-time rows.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use entity::sea_orm_active_enums::PrayerTimeSource;
use sea_orm::{ActiveModelTrait, ActiveValue};

use crate::{
    constant::TEST_TIMEZONE,
    error::TestError,
    fixtures::prayer_time::{factory::MockTimings, PrayerTimeFixtures},
};

impl<'a> PrayerTimeFixtures<'a> {
    /// Insert a cached row for the location and date, written at `fetched_at`.
    ///
    /// # Arguments
    /// - `city` - City identifier
    /// - `district` - Optional district identifier
    /// - `date` - Logical date of the row
    /// - `timings` - The six timings to store
    /// - `fetched_at` - Fetch instant, used to order rows sharing a date
    ///
    /// # Returns
    /// - `Ok(Model)` - The inserted row
    /// - `Err(TestError::DbErr)` - Insertion failed (e.g. table missing or duplicate key)
    pub async fn insert_mock_prayer_time_at(
        &mut self,
        city: &str,
        district: Option<&str>,
        date: NaiveDate,
        timings: MockTimings,
        fetched_at: NaiveDateTime,
    ) -> Result<entity::prayer_time::Model, TestError> {
        let [dawn, sunrise, midday, afternoon, sunset, nightfall] = timings;

        let location_key = match district {
            Some(district) => format!("{}/{}", city, district),
            None => city.to_string(),
        };

        let row = entity::prayer_time::ActiveModel {
            location_key: ActiveValue::Set(location_key),
            city: ActiveValue::Set(city.to_string()),
            district: ActiveValue::Set(district.map(str::to_string)),
            date: ActiveValue::Set(date),
            dawn: ActiveValue::Set(dawn.to_string()),
            sunrise: ActiveValue::Set(sunrise.to_string()),
            midday: ActiveValue::Set(midday.to_string()),
            afternoon: ActiveValue::Set(afternoon.to_string()),
            sunset: ActiveValue::Set(sunset.to_string()),
            nightfall: ActiveValue::Set(nightfall.to_string()),
            timezone: ActiveValue::Set(TEST_TIMEZONE.to_string()),
            source: ActiveValue::Set(PrayerTimeSource::Aladhan),
            fetched_at: ActiveValue::Set(fetched_at),
            created_at: ActiveValue::Set(fetched_at),
            updated_at: ActiveValue::Set(fetched_at),
            ..Default::default()
        };

        Ok(row.insert(&self.setup.db).await?)
    }

    /// Insert a cached row fetched now.
    pub async fn insert_mock_prayer_time(
        &mut self,
        city: &str,
        district: Option<&str>,
        date: NaiveDate,
        timings: MockTimings,
    ) -> Result<entity::prayer_time::Model, TestError> {
        self.insert_mock_prayer_time_at(city, district, date, timings, Utc::now().naive_utc())
            .await
    }
}
