//! Terminal UI rendering using ratatui.
//!
//! ## Submodules
//!
//! - [`chart`]: The stacked current and power panels
//! - [`common`]: Shared components (header, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! The main loop in `main.rs` calls [`render`] once per frame:
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │ Current (mA) vs Time (s)             │
//! ├──────────────────────────────────────┤
//! │ Power (W) vs Time (s)                │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlay rendered on top:
//!    - common::render_help
//! ```

pub mod chart;
pub mod common;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

/// Minimum terminal size for a usable display.
pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 12;

/// Render one full frame.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Check for minimum terminal size
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = format!(
            "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );
        let paragraph = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.error));
        let top = (area.height / 2).saturating_sub(2);
        let centered = Rect::new(0, top, area.width, 5.min(area.height - top));
        frame.render_widget(paragraph, centered);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header bar
        Constraint::Min(8),    // Charts
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    common::render_header(frame, app, chunks[0]);
    chart::render(frame, app, chunks[1]);
    common::render_status_bar(frame, app, chunks[2]);

    if app.show_help {
        common::render_help(frame, app, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::app_with;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_too_small_terminal() {
        let app = app_with(vec![]);
        let text = draw(&app, 40, 10);
        assert!(text.contains("Terminal too small"));
    }

    #[test]
    fn test_full_frame_layout() {
        let mut app = app_with(vec![Ok(vec![0x01, 0x00, 0x02, 0x00])]);
        app.reload_data().unwrap();

        let text = draw(&app, 100, 30);
        assert!(text.contains("SMARTPLUG"));
        assert!(text.contains("Power (W)"));
        assert!(text.contains("r:refresh"));
        assert!(!text.contains("Keyboard Shortcuts"));
    }

    #[test]
    fn test_help_overlay_drawn_on_top() {
        let mut app = app_with(vec![]);
        app.toggle_help();
        let text = draw(&app, 100, 30);
        assert!(text.contains("Keyboard Shortcuts"));
    }
}
