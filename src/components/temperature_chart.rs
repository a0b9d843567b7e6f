use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    symbols,
    text::Line,
    widgets::{Axis, Block, Chart, Dataset, GraphType},
};

use super::Component;
use crate::action::Action;
use crate::state::{TemperaturePoint, Theme};

/// Line chart of the daily maximum series (x = day index, y = °C)
pub struct TemperatureChart;

pub struct TemperatureChartProps<'a> {
    pub series: &'a [TemperaturePoint],
    pub theme: Theme,
}

/// Vertical headroom above/below the observed range so the line never
/// touches the frame.
const Y_PADDING: f64 = 1.0;

fn y_bounds(series: &[TemperaturePoint]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for point in series {
        min = min.min(point.max_temp as f64);
        max = max.max(point.max_temp as f64);
    }
    (min - Y_PADDING, max + Y_PADDING)
}

/// First, middle and last dates as x-axis labels
fn x_labels(series: &[TemperaturePoint]) -> Vec<String> {
    match series.len() {
        0 => Vec::new(),
        1 => vec![series[0].date.clone()],
        2 => vec![series[0].date.clone(), series[1].date.clone()],
        n => vec![
            series[0].date.clone(),
            series[n / 2].date.clone(),
            series[n - 1].date.clone(),
        ],
    }
}

impl Component<Action> for TemperatureChart {
    type Props<'a> = TemperatureChartProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if props.series.is_empty() || area.width < 12 || area.height < 5 {
            return;
        }

        let theme = props.theme;
        let points: Vec<(f64, f64)> = props
            .series
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.max_temp as f64))
            .collect();

        let x_max = (props.series.len() as f64 - 1.0).max(1.0);
        let (y_min, y_max) = y_bounds(props.series);

        let dataset = Dataset::default()
            .name("max °C")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme.accent()))
            .data(&points);

        let x_axis = Axis::default()
            .style(Style::default().fg(theme.grid()))
            .bounds([0.0, x_max])
            .labels(
                x_labels(props.series)
                    .into_iter()
                    .map(|label| Line::styled(label, Style::default().fg(theme.muted()))),
            );

        let y_axis = Axis::default()
            .style(Style::default().fg(theme.grid()))
            .bounds([y_min, y_max])
            .labels([y_min, (y_min + y_max) / 2.0, y_max].into_iter().map(|v| {
                Line::styled(format!("{v:.1}"), Style::default().fg(theme.muted()))
            }));

        let chart = Chart::new(vec![dataset])
            .block(
                Block::bordered()
                    .title("Temperature Trend")
                    .style(Style::default().bg(theme.card_bg()).fg(theme.fg())),
            )
            .x_axis(x_axis)
            .y_axis(y_axis);

        frame.render_widget(chart, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(date: &str, t: f32) -> TemperaturePoint {
        TemperaturePoint {
            date: date.into(),
            max_temp: t,
        }
    }

    #[test]
    fn test_y_bounds_pad_the_observed_range() {
        let series = vec![point("2024-01-01", 5.0), point("2024-01-02", 10.0)];
        let (min, max) = y_bounds(&series);
        assert_eq!(min, 4.0);
        assert_eq!(max, 11.0);
    }

    #[test]
    fn test_x_labels_first_middle_last() {
        let series: Vec<_> = (1..=5)
            .map(|d| point(&format!("2024-01-0{d}"), d as f32))
            .collect();
        let labels = x_labels(&series);
        assert_eq!(labels, vec!["2024-01-01", "2024-01-03", "2024-01-05"]);
    }

    #[test]
    fn test_x_labels_short_series() {
        let empty: Vec<TemperaturePoint> = Vec::new();
        assert!(x_labels(&empty).is_empty());
        assert_eq!(x_labels(&[point("2024-01-01", 1.0)]).len(), 1);
    }
}
