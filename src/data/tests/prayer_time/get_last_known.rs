use super::*;

/// Expect the row with the latest date
#[tokio::test]
async fn returns_latest_date() -> Result<(), TestError> {
    let mut test = test_setup_with_cache_table!()?;
    for day in ["2026-02-07", "2026-02-09", "2026-02-08"] {
        test.prayer_time()
            .insert_mock_prayer_time(TEST_CITY, None, factory::date(day), factory::MOCK_TIMINGS)
            .await?;
    }

    let repo = PrayerTimeRepository::new(&test.db);
    let result = repo.get_last_known(&location(None)).await?;

    assert!(result.is_some());
    assert_eq!(result.unwrap().date, factory::date("2026-02-09"));

    Ok(())
}

/// Expect a later date to win over a more recent fetch of an earlier date
#[tokio::test]
async fn prefers_date_over_fetch_time() -> Result<(), TestError> {
    let mut test = test_setup_with_cache_table!()?;
    let date = factory::date("2026-02-09");
    let earlier = factory::date("2026-01-01").and_hms_opt(8, 0, 0).unwrap();

    let expected = test
        .prayer_time()
        .insert_mock_prayer_time_at(TEST_CITY, None, date, factory::MOCK_TIMINGS, earlier)
        .await?;
    test.prayer_time()
        .insert_mock_prayer_time_at(
            TEST_CITY,
            None,
            date.pred_opt().unwrap(),
            factory::MOCK_TIMINGS_ALT,
            earlier + Duration::days(30),
        )
        .await?;

    let repo = PrayerTimeRepository::new(&test.db);
    let result = repo.get_last_known(&location(None)).await?;

    assert_eq!(result, Some(expected));

    Ok(())
}

/// Expect only rows of the requested location to be considered
#[tokio::test]
async fn ignores_other_locations() -> Result<(), TestError> {
    let mut test = test_setup_with_cache_table!()?;
    test.prayer_time()
        .insert_mock_prayer_time(
            TEST_CITY,
            Some(TEST_DISTRICT),
            factory::date("2026-02-20"),
            factory::MOCK_TIMINGS,
        )
        .await?;
    test.prayer_time()
        .insert_mock_prayer_time(
            TEST_CITY,
            None,
            factory::date("2026-02-01"),
            factory::MOCK_TIMINGS,
        )
        .await?;

    let repo = PrayerTimeRepository::new(&test.db);
    let city = repo.get_last_known(&location(None)).await?.unwrap();
    let other = repo
        .get_last_known(&LocationKey::new("ankara", None).unwrap())
        .await?;

    assert_eq!(city.date, factory::date("2026-02-01"));
    assert!(other.is_none());

    Ok(())
}
