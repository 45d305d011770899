pub mod constant;
pub mod error;
pub mod fixtures;
pub mod setup;

pub use error::TestError;
pub use setup::TestSetup;

pub mod prelude {
    pub use crate::{
        constant::{TEST_CITY, TEST_DISTRICT, TEST_TIMEZONE},
        fixtures::prayer_time::factory,
        test_setup_with_cache_table, TestError, TestSetup,
    };
}
