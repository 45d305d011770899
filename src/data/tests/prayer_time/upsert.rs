use super::*;

/// Expect a new row to be inserted and returned
#[tokio::test]
async fn inserts_new_row() -> Result<(), TestError> {
    let test = test_setup_with_cache_table!()?;
    let date = factory::date("2026-02-10");

    let repo = PrayerTimeRepository::new(&test.db);
    let result = repo
        .upsert(&location(Some(TEST_DISTRICT)), fetched(date, factory::MOCK_TIMINGS))
        .await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let row = result.unwrap();
    assert_eq!(row.location_key, format!("{}/{}", TEST_CITY, TEST_DISTRICT));
    assert_eq!(row.city, TEST_CITY);
    assert_eq!(row.district.as_deref(), Some(TEST_DISTRICT));
    assert_eq!(row.date, date);
    assert_eq!(row.dawn, "06:05");
    assert_eq!(row.nightfall, "19:23");
    assert_eq!(row.source, PrayerTimeSource::Aladhan);

    Ok(())
}

/// Expect a second upsert for the same key to replace the row in place
#[tokio::test]
async fn upsert_twice_keeps_single_row_with_latest_values() -> Result<(), TestError> {
    let test = test_setup_with_cache_table!()?;
    let date = factory::date("2026-02-10");
    let key = location(None);

    let repo = PrayerTimeRepository::new(&test.db);
    let first = repo.upsert(&key, fetched(date, factory::MOCK_TIMINGS)).await?;
    let second = repo
        .upsert(&key, fetched(date, factory::MOCK_TIMINGS_ALT))
        .await?;

    let count = entity::prelude::PrayerTime::find().count(&test.db).await?;
    assert_eq!(count, 1);

    assert_eq!(second.id, first.id);
    assert_eq!(second.dawn, "06:04");
    assert_eq!(second.afternoon, "15:42");
    assert!(second.fetched_at >= first.fetched_at);
    assert_eq!(second.created_at, first.created_at);

    let stored = repo.get(&key, date).await?;
    assert_eq!(stored, Some(second));

    Ok(())
}

/// Expect the same date under different keys to be stored separately
#[tokio::test]
async fn keeps_rows_per_location() -> Result<(), TestError> {
    let test = test_setup_with_cache_table!()?;
    let date = factory::date("2026-02-10");

    let repo = PrayerTimeRepository::new(&test.db);
    repo.upsert(&location(None), fetched(date, factory::MOCK_TIMINGS))
        .await?;
    repo.upsert(
        &location(Some(TEST_DISTRICT)),
        fetched(date, factory::MOCK_TIMINGS_ALT),
    )
    .await?;

    let count = entity::prelude::PrayerTime::find().count(&test.db).await?;
    assert_eq!(count, 2);

    Ok(())
}

/// Expect an existing row written by another process to be overwritten
#[tokio::test]
async fn overwrites_existing_fixture_row() -> Result<(), TestError> {
    let mut test = test_setup_with_cache_table!()?;
    let date = factory::date("2026-02-10");
    let old_fetch = factory::date("2026-02-01").and_hms_opt(0, 0, 0).unwrap();
    let existing = test
        .prayer_time()
        .insert_mock_prayer_time_at(TEST_CITY, None, date, factory::MOCK_TIMINGS, old_fetch)
        .await?;

    let repo = PrayerTimeRepository::new(&test.db);
    let row = repo
        .upsert(&location(None), fetched(date, factory::MOCK_TIMINGS_ALT))
        .await?;

    assert_eq!(row.id, existing.id);
    assert!(row.fetched_at > old_fetch);
    assert_eq!(row.created_at, old_fetch);
    assert_eq!(row.sunset, "18:03");

    Ok(())
}
