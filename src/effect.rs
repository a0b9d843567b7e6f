//! Effects - side effects declared by the reducer

use chrono::NaiveDate;

/// Side effects that can be triggered by actions.
///
/// The two network steps are separate effects so the reducer can publish
/// the resolved location between them; `seq` identifies the search that
/// requested the work so stale responses can be dropped.
#[derive(Debug, Clone)]
pub enum Effect {
    /// Resolve a city name to coordinates. The date range is captured at
    /// submit time so keypresses during the lookup do not shift the window.
    Geocode {
        seq: u64,
        city: String,
        start: NaiveDate,
        end: NaiveDate,
    },
    /// Fetch the daily maximum series for resolved coordinates
    FetchSeries {
        seq: u64,
        lat: f64,
        lon: f64,
        start: NaiveDate,
        end: NaiveDate,
    },
}
