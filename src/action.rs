//! Actions demonstrating category inference and async patterns

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::FailureKind;
use crate::state::{Location, TemperatureSeries};

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Search category =====
    /// Open the city search overlay
    SearchOpen,

    /// Close the search overlay (cancel)
    SearchClose,

    /// Overlay input text changed
    SearchQueryChange(String),

    /// Submit the query - starts the geocode → archive workflow.
    /// Whitespace-only input is a silent no-op.
    SearchSubmit(String),

    /// Result: geocoding picked a candidate; the location is published
    /// before the archive fetch starts. Carries the date range the search
    /// was submitted with.
    SearchDidResolve {
        seq: u64,
        location: Location,
        start: NaiveDate,
        end: NaiveDate,
    },

    /// Result: either network step failed
    SearchDidError {
        seq: u64,
        kind: FailureKind,
        detail: String,
    },

    // ===== Series category =====
    /// Result: archive data loaded and reshaped
    SeriesDidLoad {
        seq: u64,
        series: TemperatureSeries,
    },

    // ===== Ui category =====
    /// Flip between light and dark palettes
    UiToggleTheme,

    /// Force a re-render (for cursor movement, etc.)
    Render,

    // ===== Uncategorized (global) =====
    /// Re-run the last search with the current date range
    Refresh,

    /// Shift the range start by whole days (no cross-validation)
    StartDateAdjust(i64),

    /// Shift the range end by whole days
    EndDateAdjust(i64),

    /// Periodic tick for the fetch spinner
    Tick,

    /// Exit the application
    Quit,
}
