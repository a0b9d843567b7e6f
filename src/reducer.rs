//! Reducer - pure function: (state, action) -> DispatchResult
//!
//! The search workflow's decision logic lives here: validate, geocode,
//! publish the location, fetch the series, publish the series. Each step is
//! one action; the network work itself happens in the effect handler.

use chrono::Duration;
use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::error::FailureKind;
use crate::state::AppState;

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Search actions =====
        Action::SearchOpen => {
            state.search_mode = true;
            state.search_query.clear();
            DispatchResult::changed()
        }

        Action::SearchClose => {
            state.search_mode = false;
            state.search_query.clear();
            DispatchResult::changed()
        }

        Action::SearchQueryChange(query) => {
            state.search_query = query;
            DispatchResult::changed()
        }

        Action::SearchSubmit(query) => submit_search(state, query),

        Action::SearchDidResolve {
            seq,
            location,
            start,
            end,
        } => {
            if seq != state.search_seq {
                return DispatchResult::unchanged();
            }
            let (lat, lon) = (location.lat, location.lon);
            // Published before the archive fetch: still visible if it fails
            state.location = Some(location);
            // The fetch uses the range the search was submitted with, not
            // whatever the dates have been adjusted to since
            DispatchResult::changed_with(Effect::FetchSeries {
                seq,
                lat,
                lon,
                start,
                end,
            })
        }

        Action::SearchDidError {
            seq,
            kind,
            detail: _,
        } => {
            if seq != state.search_seq {
                return DispatchResult::unchanged();
            }
            state.notice = Some(kind.notice().to_string());
            if state.is_refreshing {
                // Prior series stays on screen untouched
                state.is_refreshing = false;
            } else if state.series.is_loading() {
                state.series = match kind {
                    FailureKind::CityNotFound => DataResource::Empty,
                    FailureKind::Fetch => DataResource::Failed(kind.notice().to_string()),
                };
            }
            DispatchResult::changed()
        }

        // ===== Series actions =====
        Action::SeriesDidLoad { seq, series } => {
            if seq != state.search_seq {
                return DispatchResult::unchanged();
            }
            state.series = DataResource::Loaded(series);
            state.is_refreshing = false;
            DispatchResult::changed()
        }

        // ===== Ui actions =====
        Action::UiToggleTheme => {
            state.theme = state.theme.toggle();
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Refresh => match state.last_city.clone() {
            Some(city) => submit_search(state, city),
            None => DispatchResult::unchanged(),
        },

        Action::StartDateAdjust(days) => {
            state.start_date = state.start_date + Duration::days(days);
            DispatchResult::changed()
        }

        Action::EndDateAdjust(days) => {
            state.end_date = state.end_date + Duration::days(days);
            DispatchResult::changed()
        }

        Action::Tick => {
            if state.spinner_active() {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Validate and start a search. Empty trimmed input is a silent no-op:
/// no effect, no notice, no state change.
fn submit_search(state: &mut AppState, query: String) -> DispatchResult<Effect> {
    let city = query.trim().to_string();
    if city.is_empty() {
        return DispatchResult::unchanged();
    }

    state.search_seq += 1;
    state.notice = None;
    state.search_mode = false;
    state.search_query.clear();
    state.last_city = Some(city.clone());
    if state.series.is_loaded() {
        state.is_refreshing = true;
    } else {
        state.series = DataResource::Loading;
    }
    state.tick_count = 0;

    DispatchResult::changed_with(Effect::Geocode {
        seq: state.search_seq,
        city,
        start: state.start_date,
        end: state.end_date,
    })
}
