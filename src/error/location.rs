use thiserror::Error;

/// Errors raised while validating a location or resolving its coordinates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    /// The city, or the district within it, has no known coordinates.
    ///
    /// An unmapped district is reported here even when its city is known; a district
    /// never silently resolves to its parent city's coordinates.
    #[error("Unknown location: {0}")]
    NotFound(String),
    /// The location identifiers themselves are malformed (e.g. empty).
    #[error("Invalid location: {0}")]
    InvalidLocation(String),
}
