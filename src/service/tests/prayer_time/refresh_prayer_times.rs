use super::*;
use crate::{error::Error, lock::SingleFlightLock, model::location::LocationKey};

/// Expect refresh to call the provider even when the day is cached
#[tokio::test]
async fn bypasses_cache() -> Result<(), TestError> {
    let mut test = test_setup_with_cache_table!()?;
    let date = factory::date("2026-02-10");
    let existing = test
        .prayer_time()
        .insert_mock_prayer_time(TEST_CITY, None, date, factory::MOCK_TIMINGS)
        .await?;

    let harness = Harness::new(StubProvider::new().with_timings(factory::MOCK_TIMINGS_ALT));
    let service = harness.service(&test);
    let result = service.refresh_prayer_times(TEST_CITY, None, date).await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let dto = result.unwrap();
    assert!(!dto.is_stale);
    assert_eq!(dto.timings.dawn, "06:04");
    assert!(dto.fetched_at >= existing.fetched_at);
    assert_eq!(harness.provider.calls(), 1);

    let cached = service.get_prayer_times(TEST_CITY, None, date).await.unwrap();
    assert_eq!(cached.timings, dto.timings);
    assert_eq!(harness.provider.calls(), 1);

    Ok(())
}

/// Expect refresh not to wait for a held single-flight lock
#[tokio::test]
async fn ignores_single_flight_lock() -> Result<(), TestError> {
    let test = test_setup_with_cache_table!()?;
    let date = factory::date("2026-02-10");
    let lock_key = LocationKey::new(TEST_CITY, None).unwrap().lock_key(date);

    let harness = Harness::new(StubProvider::new());
    let _guard = harness
        .lock
        .try_acquire(&lock_key, Duration::from_secs(30))
        .await
        .unwrap()
        .unwrap();

    let service = harness.service(&test);
    let result = service.refresh_prayer_times(TEST_CITY, None, date).await;

    assert!(result.is_ok(), "Error: {:?}", result);
    assert!(harness.lock.is_held(&lock_key));

    Ok(())
}

/// Expect provider errors to propagate instead of falling back
#[tokio::test]
async fn propagates_provider_error() -> Result<(), TestError> {
    let mut test = test_setup_with_cache_table!()?;
    test.prayer_time()
        .insert_mock_prayer_time(
            TEST_CITY,
            None,
            factory::date("2026-02-09"),
            factory::MOCK_TIMINGS,
        )
        .await?;

    let harness = Harness::new(StubProvider::new().unavailable());
    let service = harness.service(&test);
    let result = service
        .refresh_prayer_times(TEST_CITY, None, factory::date("2026-02-10"))
        .await;

    assert!(matches!(
        result,
        Err(Error::ProviderError(ProviderError::Timeout(_)))
    ));

    Ok(())
}
