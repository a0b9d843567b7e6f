//! temptrend - historical daily maximum temperature TUI

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use temptrend::action::Action;
use temptrend::api;
use temptrend::components::{
    Component, SearchOverlay, SearchOverlayProps, TrendDisplay, TrendDisplayProps,
};
use temptrend::effect::Effect;
use temptrend::error::SearchError;
use temptrend::reducer::reducer;
use temptrend::state::{AppState, DEFAULT_LOOKBACK_DAYS, SPINNER_TICK_MS};
use tracing::error;
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_components::centered_rect;
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

/// Historical daily maximum temperature viewer (Open-Meteo archive)
#[derive(Parser, Debug)]
#[command(name = "temptrend")]
#[command(about = "Look up a city and chart its historical daily maximum temperatures")]
struct Args {
    /// City to search for on launch (otherwise start empty)
    #[arg(long, short)]
    city: Option<String>,

    /// Range start, ISO date (default: six days before today)
    #[arg(long, value_parser = parse_date)]
    start_date: Option<NaiveDate>,

    /// Range end, ISO date (default: today)
    #[arg(long, value_parser = parse_date)]
    end_date: Option<NaiveDate>,

    /// Write diagnostic logs to this file (the terminal stays clean)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("invalid date '{s}': {e}"))
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum TrendComponentId {
    Display,
    Search,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum TrendContext {
    Main,
    Search,
}

impl EventRoutingState<TrendComponentId, TrendContext> for AppState {
    fn focused(&self) -> Option<TrendComponentId> {
        if self.search_mode {
            Some(TrendComponentId::Search)
        } else {
            Some(TrendComponentId::Display)
        }
    }

    fn modal(&self) -> Option<TrendComponentId> {
        if self.search_mode {
            Some(TrendComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: TrendComponentId) -> TrendContext {
        match id {
            TrendComponentId::Display => TrendContext::Main,
            TrendComponentId::Search => TrendContext::Search,
        }
    }

    fn default_context(&self) -> TrendContext {
        TrendContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        city,
        start_date,
        end_date,
        log_file,
        debug: debug_args,
    } = Args::parse();

    if let Some(path) = &log_file {
        init_logging(path)?;
    }

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(move || async move {
            let today = chrono::Local::now().date_naive();
            let start =
                start_date.unwrap_or(today - chrono::Duration::days(DEFAULT_LOOKBACK_DAYS));
            let end = end_date.unwrap_or(today);
            Ok::<AppState, io::Error>(AppState::new(start, end))
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let initial_action = city.map(Action::SearchSubmit);
    let result = run_app(&mut terminal, &debug, store, initial_action, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
    }
    if use_alt_screen {
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

fn init_logging(path: &std::path::Path) -> io::Result<()> {
    let file = std::fs::File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

struct TrendUi {
    display: TrendDisplay,
    search: SearchOverlay,
}

impl TrendUi {
    fn new() -> Self {
        Self {
            display: TrendDisplay,
            search: SearchOverlay::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<TrendComponentId>,
    ) {
        event_ctx.set_component_area(TrendComponentId::Display, area);

        let props = TrendDisplayProps {
            state,
            is_focused: render_ctx.is_focused() && !state.search_mode,
        };
        self.display.render(frame, area, props);

        self.search.set_open(state.search_mode);
        if state.search_mode {
            let modal_area = centered_rect(60, 7, area);
            event_ctx.set_component_area(TrendComponentId::Search, modal_area);
            let props = SearchOverlayProps {
                query: &state.search_query,
                is_focused: render_ctx.is_focused(),
                on_query_change: Action::SearchQueryChange,
                on_query_submit: Action::SearchSubmit,
            };
            self.search.render(frame, area, props);
        } else {
            event_ctx.component_areas.remove(&TrendComponentId::Search);
        }
    }

    fn handle_display_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = TrendDisplayProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .display
            .handle_event(event, props)
            .into_iter()
            .collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }

    fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        self.search.set_open(state.search_mode);
        let props = SearchOverlayProps {
            query: &state.search_query,
            is_focused: true,
            on_query_change: Action::SearchQueryChange,
            on_query_submit: Action::SearchSubmit,
        };
        let actions: Vec<_> = self.search.handle_event(event, props).into_iter().collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    initial_action: Option<Action>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(TrendUi::new()));
    let mut bus: EventBus<AppState, Action, TrendComponentId, TrendContext> = EventBus::new();
    let keybindings: Keybindings<TrendContext> = Keybindings::new();

    let ui_display = Rc::clone(&ui);
    bus.register(TrendComponentId::Display, move |event, state| {
        ui_display
            .borrow_mut()
            .handle_display_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(TrendComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            initial_action,
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(SPINNER_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

/// Handle effects by spawning tasks.
///
/// The two network steps stay strictly sequential: the archive fetch is
/// only requested by the reducer once the geocode result arrives.
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::Geocode {
            seq,
            city,
            start,
            end,
        } => {
            ctx.tasks().spawn("geocode", async move {
                match api::geocode_city(&city).await {
                    Ok(location) => Action::SearchDidResolve {
                        seq,
                        location,
                        start,
                        end,
                    },
                    Err(e) => error_action(seq, e),
                }
            });
        }
        Effect::FetchSeries {
            seq,
            lat,
            lon,
            start,
            end,
        } => {
            ctx.tasks().spawn("archive", async move {
                match api::fetch_daily_max(lat, lon, start, end).await {
                    Ok(series) => Action::SeriesDidLoad { seq, series },
                    Err(e) => error_action(seq, e),
                }
            });
        }
    }
}

fn error_action(seq: u64, err: SearchError) -> Action {
    error!(%err, seq, "search step failed");
    Action::SearchDidError {
        seq,
        kind: err.kind(),
        detail: err.to_string(),
    }
}
