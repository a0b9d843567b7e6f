use ratatui::{
    Frame,
    layout::Rect,
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use super::Component;
use crate::action::Action;
use crate::state::{Location, Theme};

/// Summary card for the resolved location: name, country, coordinates
pub struct LocationCard;

pub struct LocationCardProps<'a> {
    pub location: &'a Location,
    pub theme: Theme,
}

/// Rows the card needs including its border.
pub const CARD_HEIGHT: u16 = 5;

impl Component<Action> for LocationCard {
    type Props<'a> = LocationCardProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let theme = props.theme;
        let card_style = Style::default().bg(theme.card_bg()).fg(theme.fg());

        let lines = vec![
            Line::from(Span::styled(
                format!("Location: {}", props.location.label()),
                Style::default().fg(theme.fg()).bold(),
            )),
            Line::from(Span::styled(
                format!("Latitude: {}", props.location.lat),
                Style::default().fg(theme.muted()),
            )),
            Line::from(Span::styled(
                format!("Longitude: {}", props.location.lon),
                Style::default().fg(theme.muted()),
            )),
        ];

        frame.render_widget(
            Paragraph::new(lines).block(Block::bordered().style(card_style)),
            area,
        );
    }
}
