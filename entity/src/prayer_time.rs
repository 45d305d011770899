use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::PrayerTimeSource;

/// One cached day of prayer times for a location.
///
/// `location_key` is `"<city>"` or `"<city>/<district>"` and, together with `date`,
/// carries the table's unique index. Timing columns hold `HH:MM` wall-clock times in
/// `timezone`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "prayer_time")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub location_key: String,
    pub city: String,
    pub district: Option<String>,
    pub date: Date,
    pub dawn: String,
    pub sunrise: String,
    pub midday: String,
    pub afternoon: String,
    pub sunset: String,
    pub nightfall: String,
    pub timezone: String,
    pub source: PrayerTimeSource,
    pub fetched_at: DateTime,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
