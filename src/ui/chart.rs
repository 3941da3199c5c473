//! The two stacked chart panels: current on top, power below.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::app::App;

/// Fraction of the value range added above and below the data.
const Y_PADDING: f64 = 0.05;

/// X-axis label shared by both panels. One tick is one second.
const TIME_LABEL: &str = "Time (s)";

/// Static description of one panel.
struct Panel {
    title: &'static str,
    y_title: &'static str,
    color: Color,
}

/// Render both panels into `area`.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks =
        Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).split(area);

    let (current, power) = match app.trace {
        Some(ref trace) => (trace.current_points(), trace.power_points()),
        None => (Vec::new(), Vec::new()),
    };

    let current_panel = Panel {
        title: " Current ",
        y_title: "Current (mA)",
        color: app.theme.current,
    };
    let power_panel = Panel {
        title: " Power ",
        y_title: "Power (W)",
        color: app.theme.power,
    };

    render_panel(frame, app, chunks[0], &current_panel, &current);
    render_panel(frame, app, chunks[1], &power_panel, &power);
}

fn render_panel(frame: &mut Frame, app: &App, area: Rect, panel: &Panel, points: &[(f64, f64)]) {
    let block = Block::default()
        .title(Span::styled(panel.title, app.theme.header))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(app.theme.border_style());

    if points.is_empty() {
        let msg = if app.trace.is_none() { "Waiting for data..." } else { "No samples" };
        let placeholder = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.muted))
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let x_bounds = x_bounds(points.len());
    let y_bounds = y_bounds(points);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(panel.color))
        .data(points);

    let axis_style = Style::default().fg(app.theme.muted);
    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .title(Span::styled(TIME_LABEL, axis_style))
                .style(axis_style)
                .bounds(x_bounds)
                .labels(axis_labels(x_bounds, 0)),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(panel.y_title, axis_style))
                .style(axis_style)
                .bounds(y_bounds)
                .labels(axis_labels(y_bounds, 2)),
        );

    frame.render_widget(chart, area);
}

/// X range covering every tick, never narrower than one second.
pub fn x_bounds(len: usize) -> [f64; 2] {
    [0.0, (len.saturating_sub(1) as f64).max(1.0)]
}

/// Y range fitted to the data with a little headroom.
///
/// A flat series gets a unit-wide range around its value so the line
/// is still drawn.
pub fn y_bounds(points: &[(f64, f64)]) -> [f64; 2] {
    let (min, max) = points
        .iter()
        .map(|&(_, y)| y)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| (lo.min(y), hi.max(y)));

    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }

    let range = max - min;
    if range <= f64::EPSILON {
        return [(min - 0.5).max(0.0), max + 0.5];
    }

    let pad = range * Y_PADDING;
    [(min - pad).max(0.0), max + pad]
}

/// Labels at the low end, midpoint and high end of `bounds`.
fn axis_labels(bounds: [f64; 2], precision: usize) -> Vec<Span<'static>> {
    let [lo, hi] = bounds;
    [lo, (lo + hi) / 2.0, hi]
        .into_iter()
        .map(|v| Span::from(format!("{:.*}", precision, v)))
        .collect()
}
