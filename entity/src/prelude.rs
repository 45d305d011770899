pub use super::prayer_time::Entity as PrayerTime;
