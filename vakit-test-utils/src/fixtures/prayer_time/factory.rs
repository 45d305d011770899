//! Plain data factories for prayer-time fixtures.

use chrono::NaiveDate;
use serde_json::{json, Value};

/// The six timings in the order dawn, sunrise, midday, afternoon, sunset, nightfall.
pub type MockTimings = [&'static str; 6];

/// Timings for a February day in Izmir, as returned upstream before any adjustment.
pub const MOCK_TIMINGS: MockTimings = ["06:05", "07:32", "12:53", "15:41", "18:02", "19:23"];

/// A second set of timings, used to show that an upsert replaced earlier values.
pub const MOCK_TIMINGS_ALT: MockTimings = ["06:04", "07:31", "12:53", "15:42", "18:03", "19:24"];

/// Parse an ISO `YYYY-MM-DD` date.
///
/// # Panics
/// Panics on malformed input; fixtures use literal dates only.
pub fn date(iso: &str) -> NaiveDate {
    NaiveDate::parse_from_str(iso, "%Y-%m-%d").unwrap()
}

/// Build an aladhan `/v1/timings` response body.
///
/// Times carry the `" (+03)"` suffix the upstream appends when a timezone string is
/// supplied, so normalization is exercised by every test that goes through the endpoint.
pub fn mock_aladhan_response(date: NaiveDate, timings: MockTimings, timezone: &str) -> Value {
    let [dawn, sunrise, midday, afternoon, sunset, nightfall] = timings;

    json!({
        "code": 200,
        "status": "OK",
        "data": {
            "timings": {
                "Fajr": format!("{} (+03)", dawn),
                "Sunrise": format!("{} (+03)", sunrise),
                "Dhuhr": format!("{} (+03)", midday),
                "Asr": format!("{} (+03)", afternoon),
                "Sunset": format!("{} (+03)", sunset),
                "Maghrib": format!("{} (+03)", sunset),
                "Isha": format!("{} (+03)", nightfall),
                "Imsak": format!("{} (+03)", dawn),
                "Midnight": "00:43 (+03)"
            },
            "date": {
                "readable": date.format("%d %b %Y").to_string(),
                "gregorian": {
                    "date": date.format("%d-%m-%Y").to_string(),
                    "format": "DD-MM-YYYY"
                }
            },
            "meta": {
                "timezone": timezone,
                "method": { "id": 13 }
            }
        }
    })
}
