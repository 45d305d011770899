use super::*;

/// Expect Some when the exact location and date exist
#[tokio::test]
async fn returns_exact_match() -> Result<(), TestError> {
    let mut test = test_setup_with_cache_table!()?;
    let date = factory::date("2026-02-10");
    let existing = test
        .prayer_time()
        .insert_mock_prayer_time(TEST_CITY, None, date, factory::MOCK_TIMINGS)
        .await?;

    let repo = PrayerTimeRepository::new(&test.db);
    let result = repo.get(&location(None), date).await?;

    assert_eq!(result, Some(existing));

    Ok(())
}

/// Expect None when only other dates are cached
#[tokio::test]
async fn does_not_approximate_date() -> Result<(), TestError> {
    let mut test = test_setup_with_cache_table!()?;
    test.prayer_time()
        .insert_mock_prayer_time(
            TEST_CITY,
            None,
            factory::date("2026-02-09"),
            factory::MOCK_TIMINGS,
        )
        .await?;

    let repo = PrayerTimeRepository::new(&test.db);
    let result = repo.get(&location(None), factory::date("2026-02-10")).await?;

    assert!(result.is_none());

    Ok(())
}

/// Expect the city row and a district row to be distinct keys
#[tokio::test]
async fn distinguishes_city_and_district() -> Result<(), TestError> {
    let mut test = test_setup_with_cache_table!()?;
    let date = factory::date("2026-02-10");
    test.prayer_time()
        .insert_mock_prayer_time(TEST_CITY, None, date, factory::MOCK_TIMINGS)
        .await?;

    let repo = PrayerTimeRepository::new(&test.db);
    let district = repo.get(&location(Some(TEST_DISTRICT)), date).await?;
    let city = repo.get(&location(None), date).await?;

    assert!(district.is_none());
    assert!(city.is_some());
    assert_eq!(city.unwrap().district, None);

    Ok(())
}

/// Expect Error when the table has not been created
#[tokio::test]
async fn errors_without_table() -> Result<(), TestError> {
    let test = TestSetup::new().await?;

    let repo = PrayerTimeRepository::new(&test.db);
    let result = repo.get(&location(None), factory::date("2026-02-10")).await;

    assert!(result.is_err());

    Ok(())
}
