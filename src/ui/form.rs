//! Contact form rendering

use super::components::{render_button, BUTTON_HEIGHT};
use super::field_renderer::draw_field;
use super::layout::{centered_rect, MAX_FORM_WIDTH};
use crate::state::{ContactForm, Field, Form, FormPhase};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

const FIELD_HEIGHT: u16 = 3;
const SUBMIT_WIDTH: u16 = 14;

/// Rows needed for four fields, the button, the gaps and the frame
fn form_height() -> u16 {
    let rows = Field::ALL.len() as u16 * FIELD_HEIGHT + BUTTON_HEIGHT;
    let gaps = Field::ALL.len() as u16;
    rows + gaps + 4 // borders + margin
}

/// Draw the contact form centered in `area`
pub fn draw(frame: &mut Frame, area: Rect, form: &ContactForm) {
    let area = centered_rect(area, MAX_FORM_WIDTH, form_height());

    let block = Block::default()
        .title(" Kontaktní formulář ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    // Every row is followed by a one-line gap, so row `i` lives at chunk `2 * i`
    let mut constraints = Vec::new();
    for _ in Field::ALL {
        constraints.push(Constraint::Length(FIELD_HEIGHT));
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Length(BUTTON_HEIGHT));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(area);

    let errors = form.visible_errors();
    for (index, field) in Field::ALL.iter().enumerate() {
        if let Some(form_field) = form.get_field(index) {
            draw_field(
                frame,
                chunks[2 * index],
                form_field,
                form.active_field() == index,
                errors.get(*field),
            );
        }
    }

    // Right-aligned submit button
    let button_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(SUBMIT_WIDTH)])
        .split(chunks[2 * Field::ALL.len()]);
    let label = if form.phase() == FormPhase::Submitting {
        "Odesílám…"
    } else {
        "Odeslat"
    };
    render_button(
        frame,
        button_row[1],
        label,
        form.is_submit_focused(),
        form.can_submit(),
    );
}
