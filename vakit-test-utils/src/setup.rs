//! Test environment setup.
//!
//! Provides `TestSetup`, which bundles an in-memory SQLite database with a mockito server
//! standing in for the upstream prayer-time provider. Fixtures hang off `TestSetup` and
//! register every mock they create so tests can verify expected call counts at the end.

use mockito::{Mock, Server, ServerGuard};
use sea_orm::{
    sea_query::{Index, IndexCreateStatement, TableCreateStatement},
    ConnectionTrait, Database, DatabaseConnection, DbBackend, Schema,
};

use crate::error::TestError;

/// Name of the unique index carrying the one-row-per-location-and-day invariant.
pub static IDX_PRAYER_TIME_LOCATION_DATE: &str = "idx_prayer_time_location_key_date";

pub struct TestSetup {
    /// Database connection to in-memory SQLite database
    pub db: DatabaseConnection,
    /// Mock HTTP server for the upstream provider
    pub server: ServerGuard,
    /// Mock endpoints asserted by [`TestSetup::assert_mocks`]
    pub mocks: Vec<Mock>,
}

impl TestSetup {
    pub async fn new() -> Result<Self, TestError> {
        let server = Server::new_async().await;
        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestSetup {
            db,
            server,
            mocks: Vec::new(),
        })
    }

    /// Base URL of the mock provider server.
    pub fn server_url(&self) -> String {
        self.server.url()
    }

    pub async fn with_tables(&self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    pub async fn with_indexes(&self, stmts: Vec<IndexCreateStatement>) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Create the `prayer_time` table together with its unique (location_key, date) index.
    ///
    /// The index is created separately because the entity definition alone does not carry
    /// composite unique constraints.
    pub async fn with_cache_table(&self) -> Result<(), TestError> {
        let schema = Schema::new(DbBackend::Sqlite);

        self.with_tables(vec![
            schema.create_table_from_entity(entity::prelude::PrayerTime)
        ])
        .await?;

        self.with_indexes(vec![Index::create()
            .name(IDX_PRAYER_TIME_LOCATION_DATE)
            .table(entity::prelude::PrayerTime)
            .col(entity::prayer_time::Column::LocationKey)
            .col(entity::prayer_time::Column::Date)
            .unique()
            .to_owned()])
        .await
    }

    /// Assert all mock endpoints were called as expected.
    ///
    /// # Panics
    /// Panics if any mock endpoint was not called the expected number of times
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}

/// Create a [`TestSetup`] with the prayer-time cache table in place.
#[macro_export]
macro_rules! test_setup_with_cache_table {
    () => {{
        async {
            let setup = $crate::TestSetup::new().await?;
            setup.with_cache_table().await?;

            Ok::<_, $crate::error::TestError>(setup)
        }
        .await
    }};
}
