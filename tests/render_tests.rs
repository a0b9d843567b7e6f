//! Render snapshot tests using RenderHarness
//!
//! FRAMEWORK PATTERN: RenderHarness
//! - Create harness with terminal dimensions
//! - Render component to test buffer
//! - Convert to string for snapshot testing

use chrono::NaiveDate;
use temptrend::{
    components::{Component, TrendDisplay, TrendDisplayProps},
    state::{AppState, Location, TemperaturePoint},
};
use tui_dispatch::{DataResource, testing::*};

fn paris() -> Location {
    Location {
        name: "Paris".into(),
        country: Some("France".into()),
        lat: 48.8566,
        lon: 2.3522,
    }
}

fn paris_series() -> Vec<TemperaturePoint> {
    vec![
        TemperaturePoint {
            date: "2024-01-01".into(),
            max_temp: 5.2,
        },
        TemperaturePoint {
            date: "2024-01-02".into(),
            max_temp: 6.1,
        },
        TemperaturePoint {
            date: "2024-01-03".into(),
            max_temp: 4.8,
        },
    ]
}

fn render_state(state: &AppState, width: u16, height: u16) -> String {
    let mut render = RenderHarness::new(width, height);
    let mut component = TrendDisplay;
    render.render_to_string_plain(|frame| {
        let props = TrendDisplayProps {
            state,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    })
}

#[test]
fn test_render_initial_state() {
    let state = AppState::default();
    let output = render_state(&state, 80, 24);

    // No location yet - prompt the user to search, no card, no chart
    assert!(output.contains("Weather Tracker"), "Should show title");
    assert!(
        output.contains("to search for a city"),
        "Should show search prompt"
    );
    assert!(!output.contains("Latitude"), "No card before a search");
}

#[test]
fn test_render_date_range_line() {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
    let state = AppState::new(start, end);
    let output = render_state(&state, 80, 24);

    assert!(
        output.contains("2024-01-01 to 2024-01-07"),
        "Should show the date window:\n{}",
        output
    );
}

#[test]
fn test_render_location_card() {
    let state = AppState {
        location: Some(paris()),
        ..Default::default()
    };
    let output = render_state(&state, 80, 24);

    assert!(output.contains("Location: Paris, France"));
    assert!(output.contains("Latitude: 48.8566"));
    assert!(output.contains("Longitude: 2.3522"));
}

#[test]
fn test_render_chart_with_series() {
    let state = AppState {
        location: Some(paris()),
        series: DataResource::Loaded(paris_series()),
        ..Default::default()
    };
    let output = render_state(&state, 100, 32);

    assert!(output.contains("Temperature Trend"), "Chart title");
    assert!(
        output.contains("2024-01-01"),
        "First date should appear as an axis label:\n{}",
        output
    );
    assert!(
        output.contains("2024-01-03"),
        "Last date should appear as an axis label"
    );
}

#[test]
fn test_render_empty_series_message() {
    let state = AppState {
        location: Some(paris()),
        series: DataResource::Loaded(Vec::new()),
        ..Default::default()
    };
    let output = render_state(&state, 80, 24);

    assert!(
        output.contains("No data for this date range"),
        "Empty loaded series gets its own message:\n{}",
        output
    );
}

#[test]
fn test_render_loading_state() {
    let state = AppState {
        series: DataResource::Loading,
        ..Default::default()
    };
    let output = render_state(&state, 80, 24);

    assert!(output.contains("Loading..."), "Should show loading text");
}

#[test]
fn test_render_failed_state() {
    let state = AppState {
        series: DataResource::Failed("Error fetching data.".into()),
        notice: Some("Error fetching data.".into()),
        ..Default::default()
    };
    let output = render_state(&state, 80, 24);

    assert!(output.contains("Error fetching data."));
    assert!(output.contains("to retry"), "Should show retry hint");
}

#[test]
fn test_render_notice_line() {
    let state = AppState {
        notice: Some("City not found.".into()),
        ..Default::default()
    };
    let output = render_state(&state, 80, 24);

    assert!(output.contains("City not found."));
}

#[test]
fn test_render_help_bar() {
    let state = AppState::default();
    let output = render_state(&state, 100, 24);

    assert!(output.contains("search"), "Should show search hint");
    assert!(output.contains("theme"), "Should show theme hint");
    assert!(output.contains("refresh"), "Should show refresh hint");
    assert!(output.contains("quit"), "Should show quit hint");
}

#[test]
fn test_render_refresh_keeps_chart_visible() {
    let state = AppState {
        location: Some(paris()),
        series: DataResource::Loaded(paris_series()),
        is_refreshing: true,
        ..Default::default()
    };
    let output = render_state(&state, 100, 32);

    assert!(
        output.contains("Temperature Trend"),
        "Prior chart stays during refresh"
    );
    assert!(output.contains("Loading..."), "Spinner overlays the chart");
}

#[test]
fn test_render_tiny_terminal_does_not_panic() {
    let state = AppState {
        location: Some(paris()),
        series: DataResource::Loaded(paris_series()),
        ..Default::default()
    };
    let output = render_state(&state, 20, 8);
    assert!(!output.is_empty());
}
