//! `SeaORM` entities for the prayer-time cache.

pub mod prelude;

pub mod prayer_time;
pub mod sea_orm_active_enums;
