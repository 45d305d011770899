use sea_orm_migration::{prelude::*, schema::*};

static IDX_PRAYER_TIME_LOCATION_DATE: &str = "idx_prayer_time_location_key_date";
static IDX_PRAYER_TIME_CITY: &str = "idx_prayer_time_city";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PrayerTime::Table)
                    .if_not_exists()
                    .col(pk_auto(PrayerTime::Id))
                    .col(string(PrayerTime::LocationKey))
                    .col(string(PrayerTime::City))
                    .col(string_null(PrayerTime::District))
                    .col(date(PrayerTime::Date))
                    .col(string_len(PrayerTime::Dawn, 5))
                    .col(string_len(PrayerTime::Sunrise, 5))
                    .col(string_len(PrayerTime::Midday, 5))
                    .col(string_len(PrayerTime::Afternoon, 5))
                    .col(string_len(PrayerTime::Sunset, 5))
                    .col(string_len(PrayerTime::Nightfall, 5))
                    .col(string(PrayerTime::Timezone))
                    .col(string_len(PrayerTime::Source, 16))
                    .col(timestamp(PrayerTime::FetchedAt))
                    .col(timestamp(PrayerTime::CreatedAt))
                    .col(timestamp(PrayerTime::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // (location_key, date) is the upsert conflict target; a nullable district
        // column cannot carry the uniqueness on its own.
        manager
            .create_index(
                Index::create()
                    .name(IDX_PRAYER_TIME_LOCATION_DATE)
                    .table(PrayerTime::Table)
                    .col(PrayerTime::LocationKey)
                    .col(PrayerTime::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_PRAYER_TIME_CITY)
                    .table(PrayerTime::Table)
                    .col(PrayerTime::City)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_PRAYER_TIME_CITY)
                    .table(PrayerTime::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_PRAYER_TIME_LOCATION_DATE)
                    .table(PrayerTime::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(PrayerTime::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum PrayerTime {
    Table,
    Id,
    LocationKey,
    City,
    District,
    Date,
    Dawn,
    Sunrise,
    Midday,
    Afternoon,
    Sunset,
    Nightfall,
    Timezone,
    Source,
    FetchedAt,
    CreatedAt,
    UpdatedAt,
}
