//! Layout helpers and the status bar

use crate::app::App;
use crate::platform::{QUIT_SHORTCUT, SUBMIT_SHORTCUT};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Widest the form gets, narrower terminals use their full width
pub const MAX_FORM_WIDTH: u16 = 60;

/// Center a `width` x `height` box inside `area`, clamped to the area
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Split off the last row for the status bar
pub fn split_status_bar(area: Rect) -> (Rect, Rect) {
    let status_height = area.height.min(1);
    let main = Rect {
        height: area.height - status_height,
        ..area
    };
    let status = Rect {
        y: area.y + main.height,
        height: status_height,
        ..area
    };
    (main, status)
}

/// Draw the status bar: key hints plus the latest status message
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let key = Style::default().fg(Color::Cyan);
    let mut spans = vec![
        Span::styled(" Tab", key),
        Span::raw(": další pole  "),
        Span::styled("←/→", key),
        Span::raw(": jazyk  "),
        Span::styled(SUBMIT_SHORTCUT, key),
        Span::raw(": odeslat  "),
        Span::styled(QUIT_SHORTCUT, key),
        Span::raw(": konec"),
    ];

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Yellow)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}
