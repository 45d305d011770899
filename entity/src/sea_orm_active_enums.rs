use sea_orm::entity::prelude::*;

/// Upstream provider that computed a cached record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum PrayerTimeSource {
    #[sea_orm(string_value = "aladhan")]
    Aladhan,
}
