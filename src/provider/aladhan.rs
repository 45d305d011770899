//! Aladhan API adapter.
//!
//! Fetches daily timings from `GET /v1/timings/{DD-MM-YYYY}` with latitude, longitude,
//! computation method and timezone as query parameters.
//!
//! The afternoon (Asr) time is shifted by a fixed number of minutes after fetching. The
//! upstream's calculation for the configured method lands a few minutes earlier than the
//! regionally published schedule; the shift is a property of this adapter only and is
//! configurable through [`AladhanConfig::asr_offset_minutes`].

use std::time::Duration;

use chrono::NaiveDate;
use entity::sea_orm_active_enums::PrayerTimeSource;
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::provider::ProviderError,
    model::{
        location::Coordinates,
        prayer_time::{FetchedTimings, Timings},
    },
    provider::PrayerTimeProvider,
    util::time::{format_time_of_day, normalize_time_of_day, parse_time_of_day, shift_time_of_day},
};

pub const DEFAULT_BASE_URL: &str = "https://api.aladhan.com";

/// Diyanet İşleri Başkanlığı, Turkey.
pub const DEFAULT_METHOD: u32 = 13;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Minutes added to the upstream Asr time.
pub const DEFAULT_ASR_OFFSET_MINUTES: i64 = 5;

const USER_AGENT: &str = concat!("vakit/", env!("CARGO_PKG_VERSION"));

/// Configuration for [`AladhanProvider`].
#[derive(Debug, Clone)]
pub struct AladhanConfig {
    /// Base URL without trailing path, e.g. `https://api.aladhan.com`
    pub base_url: String,
    /// Upstream computation method id
    pub method: u32,
    /// Upper bound for a single request
    pub timeout: Duration,
    /// Minutes added to the afternoon time after fetching
    pub asr_offset_minutes: i64,
}

impl Default for AladhanConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            method: DEFAULT_METHOD,
            timeout: DEFAULT_TIMEOUT,
            asr_offset_minutes: DEFAULT_ASR_OFFSET_MINUTES,
        }
    }
}

/// [`PrayerTimeProvider`] backed by the Aladhan HTTP API.
#[derive(Debug, Clone)]
pub struct AladhanProvider {
    client: reqwest::Client,
    config: AladhanConfig,
}

#[derive(Debug, Deserialize)]
struct TimingsResponse {
    data: TimingsData,
}

#[derive(Debug, Deserialize)]
struct TimingsData {
    timings: RawTimings,
    #[serde(default)]
    date: Option<ResponseDate>,
    #[serde(default)]
    meta: Option<ResponseMeta>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawTimings {
    fajr: String,
    sunrise: String,
    dhuhr: String,
    asr: String,
    maghrib: String,
    isha: String,
}

#[derive(Debug, Deserialize)]
struct ResponseDate {
    gregorian: GregorianDate,
}

#[derive(Debug, Deserialize)]
struct GregorianDate {
    /// `DD-MM-YYYY`
    date: String,
}

#[derive(Debug, Deserialize)]
struct ResponseMeta {
    timezone: String,
}

impl AladhanProvider {
    pub fn new(config: AladhanConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client, config })
    }

    fn timings_url(&self, date: NaiveDate) -> String {
        format!(
            "{}/v1/timings/{}",
            self.config.base_url.trim_end_matches('/'),
            date.format("%d-%m-%Y")
        )
    }

    /// Maps the raw upstream payload to normalized timings.
    ///
    /// # Returns
    /// - `Ok(FetchedTimings)` - All six times normalized, Asr shifted by the configured offset
    /// - `Err(ProviderError::InvalidResponse)` - A time failed to parse, or the response is
    ///   for a different day than requested
    fn map_response(
        &self,
        response: TimingsResponse,
        requested_date: NaiveDate,
        requested_timezone: &str,
    ) -> Result<FetchedTimings, ProviderError> {
        let data = response.data;

        if let Some(date) = data.date {
            let reported = NaiveDate::parse_from_str(&date.gregorian.date, "%d-%m-%Y")
                .map_err(|e| {
                    ProviderError::InvalidResponse(format!(
                        "unparsable date {:?}: {}",
                        date.gregorian.date, e
                    ))
                })?;

            if reported != requested_date {
                return Err(ProviderError::InvalidResponse(format!(
                    "requested {} but received {}",
                    requested_date, reported
                )));
            }
        }

        let raw = data.timings;
        let normalize = |label: &str, value: &str| {
            normalize_time_of_day(value)
                .map_err(|e| ProviderError::InvalidResponse(format!("{}: {}", label, e)))
        };

        let asr = parse_time_of_day(&raw.asr)
            .map_err(|e| ProviderError::InvalidResponse(format!("Asr: {}", e)))?;
        let afternoon = format_time_of_day(shift_time_of_day(asr, self.config.asr_offset_minutes));

        let timings = Timings {
            dawn: normalize("Fajr", &raw.fajr)?,
            sunrise: normalize("Sunrise", &raw.sunrise)?,
            midday: normalize("Dhuhr", &raw.dhuhr)?,
            afternoon,
            sunset: normalize("Maghrib", &raw.maghrib)?,
            nightfall: normalize("Isha", &raw.isha)?,
        };

        let timezone = data
            .meta
            .map(|meta| meta.timezone)
            .unwrap_or_else(|| requested_timezone.to_string());

        Ok(FetchedTimings {
            timings,
            date: requested_date,
            timezone,
            source: PrayerTimeSource::Aladhan,
        })
    }
}

impl PrayerTimeProvider for AladhanProvider {
    fn source(&self) -> PrayerTimeSource {
        PrayerTimeSource::Aladhan
    }

    async fn fetch_timings(
        &self,
        coordinates: Coordinates,
        date: NaiveDate,
        timezone: &str,
    ) -> Result<FetchedTimings, ProviderError> {
        let url = self.timings_url(date);

        debug!(
            "Fetching aladhan timings: {} ({}, {})",
            url, coordinates.latitude, coordinates.longitude
        );

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("latitude", coordinates.latitude.to_string()),
                ("longitude", coordinates.longitude.to_string()),
                ("method", self.config.method.to_string()),
                ("timezonestring", timezone.to_string()),
            ])
            .send()
            .await
            .map_err(map_request_error)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: body.chars().take(500).collect(),
            });
        }

        let response: TimingsResponse = resp.json().await.map_err(|e| {
            if e.is_decode() {
                ProviderError::InvalidResponse(e.to_string())
            } else {
                map_request_error(e)
            }
        })?;

        self.map_response(response, date, timezone)
    }
}

fn map_request_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout(e.to_string())
    } else {
        ProviderError::Request(e)
    }
}
