//! UI module for rendering the TUI

mod components;
mod field_renderer;
mod form;
mod layout;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (main_area, status_area) = layout::split_status_bar(frame.area());

    form::draw(frame, main_area, &app.state.form);
    layout::draw_status_bar(frame, status_area, app);

    if let Some(dialog) = app.state.current_dialog() {
        components::render_message_dialog(frame, dialog);
    }
}
