use std::fmt;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::location::LocationError;

/// Geographic coordinates in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A city plus an optional district within it.
///
/// Identifiers are trimmed and lowercased on construction. A district can only be
/// expressed together with its city, so a "district alone" key is unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocationKey {
    city: String,
    district: Option<String>,
}

impl LocationKey {
    /// Validate and normalize a location.
    ///
    /// # Returns
    /// - `Ok(LocationKey)` - Normalized key
    /// - `Err(LocationError::InvalidLocation)` - City or provided district is empty, or an
    ///   identifier contains the `/` separator used by [`LocationKey::storage_key`]
    pub fn new(city: &str, district: Option<&str>) -> Result<Self, LocationError> {
        let city = normalize_identifier(city)
            .ok_or_else(|| LocationError::InvalidLocation(format!("invalid city {:?}", city)))?;

        let district = match district {
            Some(district) => Some(normalize_identifier(district).ok_or_else(|| {
                LocationError::InvalidLocation(format!(
                    "invalid district {:?} for city {}",
                    district, city
                ))
            })?),
            None => None,
        };

        Ok(Self { city, district })
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn district(&self) -> Option<&str> {
        self.district.as_deref()
    }

    /// Non-null column value identifying this location in the cache table.
    pub fn storage_key(&self) -> String {
        match &self.district {
            Some(district) => format!("{}/{}", self.city, district),
            None => self.city.clone(),
        }
    }

    /// Single-flight lock name scoped to this location and `date`.
    pub fn lock_key(&self, date: NaiveDate) -> String {
        format!("vakit:prayer_time:{}:{}", self.storage_key(), date)
    }
}

impl fmt::Display for LocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.storage_key())
    }
}

fn normalize_identifier(raw: &str) -> Option<String> {
    let trimmed = raw.trim();

    if trimmed.is_empty() || trimmed.contains('/') {
        return None;
    }

    Some(trimmed.to_lowercase())
}
