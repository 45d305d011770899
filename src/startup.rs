use sea_orm::DatabaseConnection;

use crate::{
    config::Config, error::Error, location::StaticCoordinateResolver,
    provider::aladhan::AladhanProvider,
};

/// Install the global tracing subscriber
///
/// Filtering follows `RUST_LOG`, defaulting to `vakit=info`. Logs go to stderr so that
/// command output on stdout stays machine readable.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vakit=info".into()),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Build the upstream provider client with the configured base URL and timeout
pub fn build_provider(config: &Config) -> Result<AladhanProvider, Error> {
    let provider = AladhanProvider::new(config.provider.clone())?;

    Ok(provider)
}

/// Built-in coordinates, extended with the configured locations file if any
pub fn build_resolver(config: &Config) -> Result<StaticCoordinateResolver, Error> {
    let resolver = match &config.locations_file {
        Some(path) => StaticCoordinateResolver::builtin_with_file(path)?,
        None => StaticCoordinateResolver::builtin(),
    };

    Ok(resolver)
}

/// Connect to Valkey/Redis for the distributed single-flight lock
#[cfg(feature = "redis")]
pub async fn connect_to_lock_store(
    config: &Config,
) -> Result<crate::lock::RedisLockRegistry, Error> {
    use fred::prelude::*;

    use crate::error::lock::LockError;

    let redis_config = fred::prelude::Config::from_url(&config.valkey_url).map_err(LockError::from)?;
    let pool = Pool::new(redis_config, None, None, None, 6).map_err(LockError::from)?;

    pool.connect();
    pool.wait_for_connect().await.map_err(LockError::from)?;

    Ok(crate::lock::RedisLockRegistry::new(pool))
}
