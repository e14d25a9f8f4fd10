//! Timelines and series shared by the tests.
use std::str::FromStr;

use chrono::{DateTime, Duration, TimeZone, Utc};
use peermap_primitives::{CountryCode, CountrySnapshot, Counters, TimeSeriesPoint, TimelineEntry};

/// # Panics
///
/// Will panic if `code` is blank.
#[must_use]
pub fn country(code: &str) -> CountryCode {
    CountryCode::from_str(code).expect("fixture country codes should be valid")
}

#[must_use]
pub fn snapshot(code: &str, awaiting_peers: u32, used_ports: u32) -> CountrySnapshot {
    CountrySnapshot::new(country(code), Counters::new(awaiting_peers, used_ports))
}

/// # Panics
///
/// Will panic if the fixed start date cannot be built.
#[must_use]
pub fn day(index: usize) -> DateTime<Utc> {
    let start = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).single().expect("valid start date");
    start + Duration::days(i64::try_from(index).expect("small fixture index"))
}

/// Two ticks with a single country:
///
/// ```text
/// 0: US 10/4
/// 1: US 12/5
/// ```
#[must_use]
pub fn us_timeline() -> Vec<TimelineEntry> {
    vec![
        TimelineEntry::new(Some(day(0)), vec![snapshot("US", 10, 4)]),
        TimelineEntry::new(Some(day(1)), vec![snapshot("US", 12, 5)]),
    ]
}

/// Three ticks with two countries. `DE` is missing from the middle tick and
/// the last tick lists the countries in another order.
///
/// ```text
/// 0: US 10/4, DE 3/1
/// 1: US 12/5
/// 2: DE 6/2,  US 20/7
/// ```
#[must_use]
pub fn two_country_timeline() -> Vec<TimelineEntry> {
    vec![
        TimelineEntry::new(Some(day(0)), vec![snapshot("US", 10, 4), snapshot("DE", 3, 1)]),
        TimelineEntry::new(Some(day(1)), vec![snapshot("US", 12, 5)]),
        TimelineEntry::new(Some(day(2)), vec![snapshot("DE", 6, 2), snapshot("US", 20, 7)]),
    ]
}

/// Aggregate world series matching the length of `timeline`, one point per
/// day, with the totals of each tick.
#[must_use]
pub fn aggregate_series(timeline: &[TimelineEntry]) -> Vec<TimeSeriesPoint> {
    timeline
        .iter()
        .enumerate()
        .map(|(index, entry)| TimeSeriesPoint::new(day(index), entry.totals()))
        .collect()
}
