use super::*;

mod get_month;
mod refresh_prayer_times;
