//! Open-Meteo API client

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::error::SearchError;
use crate::state::{Location, TemperaturePoint, TemperatureSeries};

// ============================================================================
// Geocoding API
// ============================================================================

/// Geocoding API response from Open-Meteo
#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
}

impl From<GeocodingResult> for Location {
    fn from(result: GeocodingResult) -> Self {
        Location {
            name: result.name,
            country: result.country,
            lat: result.latitude,
            lon: result.longitude,
        }
    }
}

/// Resolve a city name to coordinates using the Open-Meteo Geocoding API.
///
/// Takes the first (highest-ranked) candidate; an absent or empty result
/// list is `CityNotFound`.
pub async fn geocode_city(city: &str) -> Result<Location, SearchError> {
    let url = format!(
        "https://geocoding-api.open-meteo.com/v1/search?name={}&count=1&language=en",
        urlencoding::encode(city)
    );
    debug!(%url, "geocoding request");

    let response = reqwest::get(&url).await?;
    let data: GeocodingResponse = response.json().await?;

    data.results
        .and_then(|results| results.into_iter().next())
        .map(Location::from)
        .ok_or_else(|| SearchError::CityNotFound(city.to_string()))
}

// ============================================================================
// Archive API
// ============================================================================

/// Archive API response from Open-Meteo
#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    daily: DailyBlock,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    time: Vec<String>,
    /// Days not yet in the archive come back as null
    temperature_2m_max: Vec<Option<f32>>,
}

/// Fetch the daily maximum temperature series for a coordinate and range.
///
/// The server resolves the timezone itself (`timezone=auto`); dates are
/// passed through without local validation.
pub async fn fetch_daily_max(
    lat: f64,
    lon: f64,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<TemperatureSeries, SearchError> {
    let url = format!(
        "https://archive-api.open-meteo.com/v1/archive?latitude={lat}&longitude={lon}&start_date={start}&end_date={end}&daily=temperature_2m_max&timezone=auto"
    );
    debug!(%url, "archive request");

    let response = reqwest::get(&url).await?;
    let data: ArchiveResponse = response.json().await?;

    Ok(zip_series(data.daily.time, data.daily.temperature_2m_max))
}

/// Pair the parallel `time` / `temperature_2m_max` arrays index by index.
/// Mismatched lengths truncate to the shorter array; days the archive has
/// not filled in yet (null values) are skipped.
fn zip_series(time: Vec<String>, values: Vec<Option<f32>>) -> TemperatureSeries {
    time.into_iter()
        .zip(values)
        .filter_map(|(date, value)| value.map(|max_temp| TemperaturePoint { date, max_temp }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(days: &[&str]) -> Vec<String> {
        days.iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn test_zip_series_pairs_by_index() {
        let series = zip_series(
            dates(&["2024-01-01", "2024-01-02", "2024-01-03"]),
            vec![Some(5.2), Some(6.1), Some(4.8)],
        );
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].date, "2024-01-01");
        assert_eq!(series[0].max_temp, 5.2);
        assert_eq!(series[2].date, "2024-01-03");
        assert_eq!(series[2].max_temp, 4.8);
    }

    #[test]
    fn test_zip_series_truncates_to_shorter_array() {
        let series = zip_series(dates(&["2024-01-01", "2024-01-02"]), vec![Some(5.2)]);
        assert_eq!(series.len(), 1);

        let series = zip_series(dates(&["2024-01-01"]), vec![Some(5.2), Some(6.1)]);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].date, "2024-01-01");
    }

    #[test]
    fn test_zip_series_skips_null_days() {
        // Trailing days of a range ending today are null until the
        // archive catches up
        let series = zip_series(
            dates(&["2024-01-01", "2024-01-02", "2024-01-03"]),
            vec![Some(5.2), None, None],
        );
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].date, "2024-01-01");
        assert_eq!(series[0].max_temp, 5.2);

        let series = zip_series(
            dates(&["2024-01-01", "2024-01-02", "2024-01-03"]),
            vec![Some(5.2), None, Some(4.8)],
        );
        assert_eq!(series.len(), 2);
        assert_eq!(series[1].date, "2024-01-03");
    }

    #[test]
    fn test_zip_series_empty() {
        assert!(zip_series(Vec::new(), Vec::new()).is_empty());
    }

    #[test]
    fn test_geocoding_response_shape() {
        let json = r#"{"results":[{"name":"Paris","latitude":48.8566,"longitude":2.3522,"country":"France"}]}"#;
        let data: GeocodingResponse = serde_json::from_str(json).unwrap();
        let first = data.results.unwrap().into_iter().next().unwrap();
        let loc = Location::from(first);
        assert_eq!(loc.label(), "Paris, France");
        assert_eq!(loc.lat, 48.8566);
        assert_eq!(loc.lon, 2.3522);
    }

    #[test]
    fn test_geocoding_response_empty_results() {
        let data: GeocodingResponse = serde_json::from_str(r#"{"results":[]}"#).unwrap();
        assert!(data.results.unwrap().is_empty());

        let data: GeocodingResponse = serde_json::from_str("{}").unwrap();
        assert!(data.results.is_none());
    }

    #[test]
    fn test_archive_response_shape() {
        let json = r#"{"daily":{"time":["2024-01-01","2024-01-02"],"temperature_2m_max":[5.2,6.1]}}"#;
        let data: ArchiveResponse = serde_json::from_str(json).unwrap();
        let series = zip_series(data.daily.time, data.daily.temperature_2m_max);
        assert_eq!(series.len(), 2);
        assert_eq!(series[1].max_temp, 6.1);
    }

    #[test]
    fn test_archive_response_with_null_days() {
        let json = r#"{"daily":{"time":["2024-01-01","2024-01-02"],"temperature_2m_max":[5.2,null]}}"#;
        let data: ArchiveResponse = serde_json::from_str(json).unwrap();
        let series = zip_series(data.daily.time, data.daily.temperature_2m_max);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].date, "2024-01-01");
        assert_eq!(series[0].max_temp, 5.2);
    }
}
