use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Flex, Layout};
use ratatui::prelude::{Frame, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tui_dispatch::{DataResource, EventKind};
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::location_card::CARD_HEIGHT;
use super::{
    Component, LocationCard, LocationCardProps, TemperatureChart, TemperatureChartProps,
};
use crate::action::Action;
use crate::state::{AppState, TemperatureSeries, Theme};

pub const ERROR_ICON: &str = "\u{26a0}\u{fe0f}";

/// Props for TrendDisplay - read-only view of state
pub struct TrendDisplayProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The main display: title, location card, temperature chart, notice line
#[derive(Default)]
pub struct TrendDisplay;

impl Component<Action> for TrendDisplay {
    type Props<'a> = TrendDisplayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('/') => Some(Action::SearchOpen),
                KeyCode::Char('r') | KeyCode::F(5) => Some(Action::Refresh),
                KeyCode::Char('t') => Some(Action::UiToggleTheme),
                KeyCode::Char('[') => Some(Action::StartDateAdjust(-1)),
                KeyCode::Char(']') => Some(Action::StartDateAdjust(1)),
                KeyCode::Char('{') => Some(Action::EndDateAdjust(-1)),
                KeyCode::Char('}') => Some(Action::EndDateAdjust(1)),
                KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: TrendDisplayProps<'_>) {
        let state = props.state;
        let theme = state.theme;

        // Whole-surface palette fill
        frame.render_widget(
            Block::new().style(Style::default().bg(theme.bg()).fg(theme.fg())),
            area,
        );

        let card_height = if state.location.is_some() {
            CARD_HEIGHT
        } else {
            0
        };

        let chunks = Layout::vertical([
            Constraint::Length(1),           // Title + date range
            Constraint::Length(card_height), // Location card
            Constraint::Min(1),              // Chart / placeholder
            Constraint::Length(1),           // Notice
            Constraint::Length(1),           // Help bar
        ])
        .split(area);

        render_title(frame, chunks[0], state);

        if let Some(location) = &state.location {
            let mut card = LocationCard;
            card.render(frame, chunks[1], LocationCardProps { location, theme });
        }

        render_body(frame, chunks[2], state);
        render_notice(frame, chunks[3], state);

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[4],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("/", "search"),
                    StatusBarHint::new("r", "refresh"),
                    StatusBarHint::new("t", "theme"),
                    StatusBarHint::new("[ ]", "start date"),
                    StatusBarHint::new("{ }", "end date"),
                    StatusBarHint::new("q", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

fn render_title(frame: &mut Frame, area: Rect, state: &AppState) {
    let theme = state.theme;
    let cols = Layout::horizontal([Constraint::Min(1), Constraint::Length(26)]).split(area);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Weather Tracker",
            Style::default().fg(theme.fg()).bold(),
        ))),
        cols[0],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(Span::styled(
                format!("{} to {}", state.start_date, state.end_date),
                Style::default().fg(theme.muted()),
            ))
            .right_aligned(),
        ),
        cols[1],
    );
}

fn render_body(frame: &mut Frame, area: Rect, state: &AppState) {
    let theme = state.theme;

    if state.spinner_active() {
        // Keep the previous chart visible during a refresh
        if let (true, Some(series)) = (state.is_refreshing, state.series.data()) {
            render_chart(frame, area, series, theme);
        }
        render_centered(
            frame,
            area,
            Line::from(vec![
                Span::styled(state.spinner_frame(), Style::default().fg(theme.accent())),
                Span::styled(" Loading...", Style::default().fg(theme.muted())),
            ]),
        );
        return;
    }

    match &state.series {
        DataResource::Loaded(series) if !series.is_empty() => {
            render_chart(frame, area, series, theme);
        }
        DataResource::Loaded(_) => {
            render_centered(
                frame,
                area,
                Line::from(Span::styled(
                    "No data for this date range",
                    Style::default().fg(theme.muted()),
                )),
            );
        }
        DataResource::Failed(message) => render_error(frame, area, message, theme),
        DataResource::Loading | DataResource::Empty => {
            render_centered(
                frame,
                area,
                Line::from(vec![
                    Span::styled("Press ", Style::default().fg(theme.muted())),
                    Span::styled("/", Style::default().fg(theme.accent()).bold()),
                    Span::styled(" to search for a city", Style::default().fg(theme.muted())),
                ]),
            );
        }
    }
}

fn render_chart(frame: &mut Frame, area: Rect, series: &TemperatureSeries, theme: Theme) {
    let mut chart = TemperatureChart;
    chart.render(frame, area, TemperatureChartProps { series, theme });
}

fn render_centered(frame: &mut Frame, area: Rect, line: Line<'_>) {
    let rows = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .split(area);
    frame.render_widget(Paragraph::new(line.centered()), rows[0]);
}

fn render_error(frame: &mut Frame, area: Rect, message: &str, theme: Theme) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // icon
        Constraint::Length(1), // message
        Constraint::Length(1), // blank
        Constraint::Length(1), // hint
    ])
    .flex(Flex::Center)
    .split(area);

    frame.render_widget(
        Paragraph::new(Line::from(ERROR_ICON).centered()),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(Span::styled(
                message.to_string(),
                Style::default().fg(Color::Red).bold(),
            ))
            .centered(),
        ),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(theme.muted())),
                Span::styled("r", Style::default().fg(theme.accent()).bold()),
                Span::styled(" to retry", Style::default().fg(theme.muted())),
            ])
            .centered(),
        ),
        chunks[3],
    );
}

fn render_notice(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(notice) = &state.notice else {
        return;
    };
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![
                Span::raw(format!("{ERROR_ICON} ")),
                Span::styled(
                    notice.clone(),
                    Style::default().fg(Color::Red).bold(),
                ),
            ])
            .centered(),
        ),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::*;

    #[test]
    fn test_handle_event_open_search() {
        let mut component = TrendDisplay;
        let state = AppState::default();
        let props = TrendDisplayProps {
            state: &state,
            is_focused: true,
        };

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("/")), props)
            .into_iter()
            .collect();
        actions.assert_count(1);
        actions.assert_first(Action::SearchOpen);
    }

    #[test]
    fn test_handle_event_theme_toggle() {
        let mut component = TrendDisplay;
        let state = AppState::default();
        let props = TrendDisplayProps {
            state: &state,
            is_focused: true,
        };

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("t")), props)
            .into_iter()
            .collect();
        actions.assert_first(Action::UiToggleTheme);
    }

    #[test]
    fn test_handle_event_date_adjust() {
        let mut component = TrendDisplay;
        let state = AppState::default();

        let actions: Vec<_> = component
            .handle_event(
                &EventKind::Key(key("[")),
                TrendDisplayProps {
                    state: &state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        actions.assert_first(Action::StartDateAdjust(-1));

        let actions: Vec<_> = component
            .handle_event(
                &EventKind::Key(key("}")),
                TrendDisplayProps {
                    state: &state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        actions.assert_first(Action::EndDateAdjust(1));
    }

    #[test]
    fn test_handle_event_unfocused_ignores() {
        let mut component = TrendDisplay;
        let state = AppState::default();
        let props = TrendDisplayProps {
            state: &state,
            is_focused: false,
        };

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("/")), props)
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_render_empty_state_shows_hint() {
        let mut render = RenderHarness::new(60, 24);
        let mut component = TrendDisplay;
        let state = AppState::default();

        let output = render.render_to_string_plain(|frame| {
            let props = TrendDisplayProps {
                state: &state,
                is_focused: true,
            };
            component.render(frame, frame.area(), props);
        });

        assert!(output.contains("to search for a city"));
    }
}
