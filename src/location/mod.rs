//! Mapping of location keys to coordinates.
//!
//! The resolver is a static lookup: it knows a fixed set of cities and districts and
//! fails with [`LocationError::NotFound`] for anything else. A district never falls back
//! to its city's coordinates, since the timings of neighbouring districts can differ by
//! several minutes.

mod builtin;

use std::collections::HashMap;

use serde::Deserialize;

use crate::{
    error::{config::ConfigError, location::LocationError},
    model::location::{Coordinates, LocationKey},
};

/// Maps a location key to geographic coordinates.
pub trait CoordinateResolver: Send + Sync {
    /// Resolve the coordinates of a city, or of a district within it.
    ///
    /// # Returns
    /// - `Ok(Coordinates)` - Coordinates of the district if one is given, else of the city
    /// - `Err(LocationError::NotFound)` - City unknown, or district unknown within the city
    fn resolve(&self, location: &LocationKey) -> Result<Coordinates, LocationError>;
}

/// Coordinates of a city and the districts mapped within it.
#[derive(Debug, Clone, Deserialize)]
pub struct CityEntry {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub districts: HashMap<String, Coordinates>,
}

impl CityEntry {
    fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// In-memory [`CoordinateResolver`] over a fixed city table.
#[derive(Debug, Clone, Default)]
pub struct StaticCoordinateResolver {
    cities: HashMap<String, CityEntry>,
}

impl StaticCoordinateResolver {
    /// Creates an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a resolver with the built-in city and district table.
    pub fn builtin() -> Self {
        let mut resolver = Self::new();

        for (city, latitude, longitude, districts) in builtin::CITIES {
            resolver.insert_city(city, Coordinates::new(*latitude, *longitude));
            for (district, latitude, longitude) in *districts {
                resolver.insert_district(city, district, Coordinates::new(*latitude, *longitude));
            }
        }

        resolver
    }

    /// Adds or replaces a city, keeping any districts already mapped under it.
    pub fn insert_city(&mut self, city: &str, coordinates: Coordinates) {
        let entry = self
            .cities
            .entry(normalize(city))
            .or_insert_with(|| CityEntry {
                latitude: coordinates.latitude,
                longitude: coordinates.longitude,
                districts: HashMap::new(),
            });

        entry.latitude = coordinates.latitude;
        entry.longitude = coordinates.longitude;
    }

    /// Adds or replaces a district of an already inserted city.
    ///
    /// Districts of unknown cities are ignored; a district is only reachable through its city.
    pub fn insert_district(&mut self, city: &str, district: &str, coordinates: Coordinates) {
        if let Some(entry) = self.cities.get_mut(&normalize(city)) {
            entry.districts.insert(normalize(district), coordinates);
        }
    }

    /// Merges cities and districts from a JSON document.
    ///
    /// The document maps city identifiers to
    /// `{"latitude": .., "longitude": .., "districts": {"<name>": {"latitude": .., "longitude": ..}}}`.
    pub fn extend_from_json(&mut self, json: &str) -> Result<(), serde_json::Error> {
        let cities: HashMap<String, CityEntry> = serde_json::from_str(json)?;

        for (city, entry) in cities {
            self.insert_city(&city, entry.coordinates());
            for (district, coordinates) in entry.districts {
                self.insert_district(&city, &district, coordinates);
            }
        }

        Ok(())
    }

    /// Built-in table extended by the JSON file at `path`.
    pub fn builtin_with_file(path: &str) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::LocationsFile {
            path: path.to_string(),
            reason: e.to_string(),
        })?;

        let mut resolver = Self::builtin();
        resolver
            .extend_from_json(&json)
            .map_err(|e| ConfigError::LocationsFile {
                path: path.to_string(),
                reason: e.to_string(),
            })?;

        Ok(resolver)
    }
}

impl CoordinateResolver for StaticCoordinateResolver {
    fn resolve(&self, location: &LocationKey) -> Result<Coordinates, LocationError> {
        let city = self
            .cities
            .get(location.city())
            .ok_or_else(|| LocationError::NotFound(location.storage_key()))?;

        match location.district() {
            Some(district) => city
                .districts
                .get(district)
                .copied()
                .ok_or_else(|| LocationError::NotFound(location.storage_key())),
            None => Ok(city.coordinates()),
        }
    }
}

fn normalize(identifier: &str) -> String {
    identifier.trim().to_lowercase()
}
