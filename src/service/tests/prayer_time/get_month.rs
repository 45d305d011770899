use super::*;
use crate::error::Error;

/// Expect one entry per day of the month in calendar order
#[tokio::test]
async fn resolves_every_day() -> Result<(), TestError> {
    let mut test = test_setup_with_cache_table!()?;
    test.prayer_time()
        .insert_mock_prayer_time(
            TEST_CITY,
            None,
            factory::date("2026-02-01"),
            factory::MOCK_TIMINGS,
        )
        .await?;

    let harness = Harness::new(StubProvider::new());
    let service = harness.service(&test);
    let result = service.get_month(TEST_CITY, None, 2026, 2).await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let days = result.unwrap();
    assert_eq!(days.len(), 28);
    assert_eq!(days[0].date, factory::date("2026-02-01"));
    assert_eq!(days[27].date, factory::date("2026-02-28"));
    assert!(days.iter().all(|day| !day.is_stale));
    // The first day was already cached
    assert_eq!(harness.provider.calls(), 27);

    Ok(())
}

/// Expect an invalid month to be rejected without touching the provider
#[tokio::test]
async fn rejects_invalid_month() -> Result<(), TestError> {
    let test = test_setup_with_cache_table!()?;

    let harness = Harness::new(StubProvider::new());
    let service = harness.service(&test);
    let result = service.get_month(TEST_CITY, None, 2026, 13).await;

    assert!(matches!(result, Err(Error::ParseError(_))));
    assert_eq!(harness.provider.calls(), 0);

    Ok(())
}
