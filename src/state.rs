//! Application state - single source of truth

use chrono::{Duration, Local, NaiveDate};
use ratatui::style::Color;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

/// A resolved location (first geocoding candidate)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Location {
    pub name: String,
    pub country: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    /// "Paris, France" when a country is known, bare name otherwise
    pub fn label(&self) -> String {
        match &self.country {
            Some(country) => format!("{}, {}", self.name, country),
            None => self.name.clone(),
        }
    }
}

/// One day of archive data
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TemperaturePoint {
    /// ISO-8601 calendar date as delivered by the archive API
    pub date: String,
    /// Daily maximum temperature in °C
    pub max_temp: f32,
}

/// Chronological, one entry per day in the requested range
pub type TemperatureSeries = Vec<TemperaturePoint>;

/// Color palette preference
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn bg(&self) -> Color {
        match self {
            Theme::Light => Color::Rgb(244, 244, 244),
            Theme::Dark => Color::Rgb(17, 17, 17),
        }
    }

    pub fn fg(&self) -> Color {
        match self {
            Theme::Light => Color::Black,
            Theme::Dark => Color::White,
        }
    }

    pub fn card_bg(&self) -> Color {
        match self {
            Theme::Light => Color::Rgb(255, 255, 255),
            Theme::Dark => Color::Rgb(34, 34, 34),
        }
    }

    pub fn grid(&self) -> Color {
        match self {
            Theme::Light => Color::Rgb(204, 204, 204),
            Theme::Dark => Color::Rgb(85, 85, 85),
        }
    }

    pub fn muted(&self) -> Color {
        match self {
            Theme::Light => Color::Rgb(120, 120, 120),
            Theme::Dark => Color::Rgb(160, 160, 160),
        }
    }

    /// Trend line color, theme-independent
    pub fn accent(&self) -> Color {
        Color::Rgb(249, 115, 22)
    }
}

/// Spinner timing while a fetch is in flight.
pub const SPINNER_TICK_MS: u64 = 80;
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Days looked back from today for the default date window (7 days inclusive).
pub const DEFAULT_LOOKBACK_DAYS: i64 = 6;

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    // --- Core data (visible in debug) ---
    /// Resolved location, absent until the first successful geocode
    #[debug(section = "Location", label = "Resolved", debug_fmt)]
    pub location: Option<Location>,

    /// Series lifecycle: Empty → Loading → Loaded/Failed
    #[debug(section = "Series", label = "Data", debug_fmt)]
    pub series: DataResource<TemperatureSeries>,

    /// Whether a refetch is in progress (keeps prior data on screen)
    #[debug(section = "Series", label = "Refreshing")]
    pub is_refreshing: bool,

    /// Last submitted city, so `r` can re-run the search
    #[debug(section = "Query", label = "City", debug_fmt)]
    pub last_city: Option<String>,

    /// Start of the requested range (no cross-validation against end)
    #[debug(section = "Query", label = "Start", debug_fmt)]
    pub start_date: NaiveDate,

    /// End of the requested range
    #[debug(section = "Query", label = "End", debug_fmt)]
    pub end_date: NaiveDate,

    /// Light/dark palette
    #[debug(section = "Ui", label = "Theme", debug_fmt)]
    pub theme: Theme,

    /// User-facing notice line ("City not found." etc.), cleared on next search
    #[debug(section = "Ui", label = "Notice", debug_fmt)]
    pub notice: Option<String>,

    // --- Internals (skipped) ---
    /// Monotonic search id; responses carrying an older id are dropped
    #[debug(skip)]
    pub search_seq: u64,

    /// Spinner frame counter
    #[debug(skip)]
    pub tick_count: u32,

    // --- Search overlay (skipped) ---
    /// Whether the search overlay is open
    #[debug(skip)]
    pub search_mode: bool,

    /// Current overlay input
    #[debug(skip)]
    pub search_query: String,
}

impl AppState {
    /// Create state for the given date range, nothing resolved yet
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            location: None,
            series: DataResource::Empty,
            is_refreshing: false,
            last_city: None,
            start_date,
            end_date,
            theme: Theme::default(),
            notice: None,
            search_seq: 0,
            tick_count: 0,
            search_mode: false,
            search_query: String::new(),
        }
    }

    pub fn spinner_active(&self) -> bool {
        self.series.is_loading() || self.is_refreshing
    }

    pub fn spinner_frame(&self) -> &'static str {
        SPINNER_FRAMES[self.tick_count as usize % SPINNER_FRAMES.len()]
    }
}

impl Default for AppState {
    fn default() -> Self {
        let today = Local::now().date_naive();
        Self::new(today - Duration::days(DEFAULT_LOOKBACK_DAYS), today)
    }
}
