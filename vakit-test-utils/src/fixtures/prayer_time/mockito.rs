//! Mock aladhan endpoints.
//!
//! Each method registers the created mock with the [`TestSetup`](crate::TestSetup) so
//! `assert_mocks` verifies the expected request count.

use chrono::NaiveDate;
use mockito::Matcher;

use crate::{
    constant::TEST_TIMEZONE,
    fixtures::prayer_time::{
        factory::{mock_aladhan_response, MockTimings},
        PrayerTimeFixtures,
    },
};

fn timings_path(date: NaiveDate) -> String {
    format!("/v1/timings/{}", date.format("%d-%m-%Y"))
}

impl<'a> PrayerTimeFixtures<'a> {
    /// Mock `GET /v1/timings/{DD-MM-YYYY}` returning the given timings.
    ///
    /// # Arguments
    /// - `date` - Date in the request path
    /// - `timings` - Timings in the response body
    /// - `expected_requests` - Number of times the endpoint should be called
    pub fn create_timings_endpoint(
        &mut self,
        date: NaiveDate,
        timings: MockTimings,
        expected_requests: usize,
    ) {
        let body = mock_aladhan_response(date, timings, TEST_TIMEZONE);

        let mock = self
            .setup
            .server
            .mock("GET", timings_path(date).as_str())
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create();

        self.setup.mocks.push(mock);
    }

    /// Mock `GET /v1/timings/{DD-MM-YYYY}` failing with the given status.
    pub fn create_failing_timings_endpoint(
        &mut self,
        date: NaiveDate,
        status: usize,
        expected_requests: usize,
    ) {
        let mock = self
            .setup
            .server
            .mock("GET", timings_path(date).as_str())
            .match_query(Matcher::Any)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(r#"{"code":500,"status":"Internal Server Error","data":"upstream failure"}"#)
            .expect(expected_requests)
            .create();

        self.setup.mocks.push(mock);
    }
}
