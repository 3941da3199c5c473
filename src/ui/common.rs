//! Common UI components around the charts.
//!
//! This module contains the header bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::duration::format_duration;

/// Render the header bar with the latest readings.
///
/// Displays: title, sample count, latest current/power, peak current, mean power.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = Span::styled(
        format!(" {} ", app.title.to_uppercase()),
        Style::default().add_modifier(Modifier::BOLD),
    );

    let Some(summary) = app.summary() else {
        let line = Line::from(vec![title, Span::raw("| Waiting for first reading...")]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let line = Line::from(vec![
        Span::styled("● ", Style::default().fg(app.theme.current)),
        title,
        Span::raw("│ "),
        Span::styled(summary.count.to_string(), bold),
        Span::raw(" samples │ now "),
        Span::styled(
            format_current(summary.latest_current_ma),
            Style::default().fg(app.theme.current).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            format_power(summary.latest_power_w),
            Style::default().fg(app.theme.power).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" │ peak "),
        Span::raw(format_current(summary.peak_current_ma)),
        Span::raw(" │ avg "),
        Span::raw(format_power(summary.mean_power_w)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Format a current reading for display (e.g., 1234 -> "1234 mA").
fn format_current(ma: Option<u16>) -> String {
    match ma {
        Some(ma) => format!("{} mA", ma),
        None => "-".to_string(),
    }
}

/// Format a power value for display (e.g., 1500.0 -> "1.50 kW").
fn format_power(watts: Option<f64>) -> String {
    match watts {
        Some(w) if w >= 1_000.0 => format!("{:.2} kW", w / 1_000.0),
        Some(w) => format!("{:.2} W", w),
        None => "-".to_string(),
    }
}

/// Render the status bar at the bottom.
///
/// Shows: source, time since last update, countdown to the next fetch,
/// and available controls. Temporary status messages take precedence.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if let Some(ref trace) = app.trace {
        format!(
            " {} | Updated {} ago | Next in {} | r:refresh e:export ?:help q:quit",
            app.source_description(),
            format_duration(trace.received_at.elapsed()),
            format_duration(app.time_until_fetch()),
        )
    } else {
        format!(" {} | Fetching... | q:quit", app.source_description())
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the charts.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from("  r         Fetch now"),
        Line::from("  e         Export to JSON"),
        Line::from("  ?         Toggle help"),
        Line::from("  q / Esc   Quit"),
        Line::from("  Ctrl-C    Quit"),
        Line::from(""),
        Line::from(format!("  Voltage   {:.1} V", app.voltage)),
        Line::from(format!("  Refresh   {}", format_duration(app.refresh_interval))),
        Line::from(format!("  Fetches   {} ({} empty)", app.fetch_count, app.empty_count)),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 40u16.min(area.width.saturating_sub(4));
    let help_height = 15u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::app_with;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &App, render: fn(&mut Frame, &App, Rect)) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|frame| render(frame, app, frame.area())).unwrap();
        terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_format_current_and_power() {
        assert_eq!(format_current(Some(32)), "32 mA");
        assert_eq!(format_current(None), "-");
        assert_eq!(format_power(Some(7.04)), "7.04 W");
        assert_eq!(format_power(Some(14417.7)), "14.42 kW");
        assert_eq!(format_power(None), "-");
    }

    #[test]
    fn test_header_before_first_reading() {
        let app = app_with(vec![]).with_title("Kitchen");
        let text = draw(&app, render_header);
        assert!(text.contains("KITCHEN"));
        assert!(text.contains("Waiting for first reading"));
    }

    #[test]
    fn test_header_shows_latest_reading() {
        let mut app = app_with(vec![Ok(vec![0x10, 0x00, 0x20, 0x00])]);
        app.reload_data().unwrap();

        let text = draw(&app, render_header);
        assert!(text.contains("2 samples"));
        assert!(text.contains("32 mA"));
        assert!(text.contains("7.04 W"));
        assert!(text.contains("avg 5.28 W"));
    }

    #[test]
    fn test_status_bar_shows_source() {
        let app = app_with(vec![]);
        let text = draw(&app, render_status_bar);
        assert!(text.contains("scripted"));
        assert!(text.contains("Fetching..."));
    }

    #[test]
    fn test_status_message_takes_precedence() {
        let mut app = app_with(vec![]);
        app.set_status_message("Exported to out.json".to_string());
        let text = draw(&app, render_status_bar);
        assert!(text.contains("Exported to out.json"));
        assert!(!text.contains("Fetching..."));
    }

    #[test]
    fn test_help_overlay() {
        let app = app_with(vec![]);
        let text = draw(&app, render_help);
        assert!(text.contains("Keyboard Shortcuts"));
        assert!(text.contains("220.0 V"));
    }
}
