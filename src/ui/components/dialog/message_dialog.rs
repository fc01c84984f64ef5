//! Submission result and error dialogs

use super::base::{render_dialog, DialogConfig};
use crate::state::Dialog;
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};

/// Render the dialog at the front of the queue
pub fn render_message_dialog(frame: &mut Frame, dialog: &Dialog) {
    let color = match dialog {
        Dialog::Submitted(_) => Color::Green,
        Dialog::Error(_) => Color::Red,
    };

    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let hint = vec![
        Span::styled("Enter", key_style),
        Span::raw(" nebo "),
        Span::styled("Esc", key_style),
        Span::raw(" zavře"),
    ];

    render_dialog(
        frame,
        DialogConfig {
            title: dialog.title(),
            title_color: color,
            border_color: color,
            message: dialog.message(),
            hint: Some(hint),
            max_width: 60,
        },
    );
}
