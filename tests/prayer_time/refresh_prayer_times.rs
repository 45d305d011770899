use super::*;

/// Expect refresh to overwrite a cached day with the upstream's values
#[tokio::test]
async fn overwrites_cached_day() -> Result<(), TestError> {
    let mut test = test_setup_with_cache_table!()?;
    let date = factory::date("2026-02-10");
    let existing = test
        .prayer_time()
        .insert_mock_prayer_time("izmir", None, date, factory::MOCK_TIMINGS)
        .await?;
    test.prayer_time()
        .create_timings_endpoint(date, factory::MOCK_TIMINGS_ALT, 1);

    let stack = Stack::new(&test);
    let service = stack.service(&test);
    let result = service.refresh_prayer_times("izmir", None, date).await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let dto = result.unwrap();
    assert!(!dto.is_stale);
    assert_eq!(dto.timings.dawn, "06:04");
    assert!(dto.fetched_at >= existing.fetched_at);

    let cached = service.get_prayer_times("izmir", None, date).await.unwrap();
    assert_eq!(cached.timings, dto.timings);

    test.assert_mocks();

    Ok(())
}
