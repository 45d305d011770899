use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use vakit::error::Error;

use super::*;

/// Expect an empty cache to be filled from the upstream and served fresh
#[tokio::test]
async fn fetches_and_stores_on_empty_cache() -> Result<(), TestError> {
    let mut test = test_setup_with_cache_table!()?;
    let date = factory::date("2026-02-10");
    test.prayer_time()
        .create_timings_endpoint(date, factory::MOCK_TIMINGS, 1);

    let stack = Stack::new(&test);
    let service = stack.service(&test);
    let result = service.get_prayer_times("izmir", None, date).await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let dto = result.unwrap();
    assert!(!dto.is_stale);
    assert_eq!(dto.source, "aladhan");
    assert_eq!(dto.city, "izmir");
    assert_eq!(dto.district, None);
    assert_eq!(dto.date, date);
    assert_eq!(dto.timezone, TEST_TIMEZONE);
    assert_eq!(dto.timings.dawn, "06:05");
    assert_eq!(dto.timings.sunset, "18:02");
    // Asr correction applied by the adapter
    assert_eq!(dto.timings.afternoon, "15:46");

    let row = entity::prelude::PrayerTime::find()
        .filter(entity::prayer_time::Column::LocationKey.eq("izmir"))
        .filter(entity::prayer_time::Column::Date.eq(date))
        .one(&test.db)
        .await?;
    assert!(row.is_some());
    assert_eq!(row.unwrap().dawn, "06:05");

    test.assert_mocks();

    Ok(())
}

/// Expect the second lookup for the same day not to reach the upstream
#[tokio::test]
async fn second_lookup_does_not_call_upstream() -> Result<(), TestError> {
    let mut test = test_setup_with_cache_table!()?;
    let date = factory::date("2026-02-10");
    test.prayer_time()
        .create_timings_endpoint(date, factory::MOCK_TIMINGS, 1);

    let stack = Stack::new(&test);
    let service = stack.service(&test);
    let first = service
        .get_prayer_times("Izmir ", Some("Bornova"), date)
        .await
        .unwrap();
    let second = service
        .get_prayer_times("izmir", Some("bornova"), date)
        .await
        .unwrap();

    assert_eq!(first.timings, second.timings);
    assert_eq!(second.district.as_deref(), Some("bornova"));

    test.assert_mocks();

    Ok(())
}

/// Expect an upstream outage to be served from the most recent cached day
#[tokio::test]
async fn serves_stale_row_on_upstream_outage() -> Result<(), TestError> {
    let mut test = test_setup_with_cache_table!()?;
    let date = factory::date("2026-02-10");
    test.prayer_time()
        .insert_mock_prayer_time(
            "izmir",
            None,
            factory::date("2026-02-09"),
            factory::MOCK_TIMINGS_ALT,
        )
        .await?;
    test.prayer_time()
        .create_failing_timings_endpoint(date, 503, 1);

    let stack = Stack::new(&test);
    let service = stack.service(&test);
    let result = service.get_prayer_times("izmir", None, date).await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let dto = result.unwrap();
    assert!(dto.is_stale);
    assert_eq!(dto.date, factory::date("2026-02-09"));
    assert_eq!(dto.timings.dawn, "06:04");

    test.assert_mocks();

    Ok(())
}

/// Expect NoDataAvailable when the upstream fails and the location was never cached
#[tokio::test]
async fn reports_no_data_without_cache() -> Result<(), TestError> {
    let mut test = test_setup_with_cache_table!()?;
    let date = factory::date("2026-02-10");
    test.prayer_time()
        .create_failing_timings_endpoint(date, 500, 1);

    let stack = Stack::new(&test);
    let service = stack.service(&test);
    let result = service.get_prayer_times("izmir", None, date).await;

    assert!(matches!(result, Err(Error::NoDataAvailable { .. })));

    test.assert_mocks();

    Ok(())
}
