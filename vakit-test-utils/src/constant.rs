//! Shared values used when building test fixtures.

/// City identifier used by most fixtures; present in the built-in coordinate table.
pub static TEST_CITY: &str = "izmir";

/// District of [`TEST_CITY`] present in the built-in coordinate table.
pub static TEST_DISTRICT: &str = "bornova";

/// Timezone reported by the mocked upstream.
pub static TEST_TIMEZONE: &str = "Europe/Istanbul";
