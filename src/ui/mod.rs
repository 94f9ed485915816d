//! UI rendering components
//!
//! Every frame is drawn from scratch out of [`AppState`]; nothing here keeps
//! state of its own.

pub mod command_line;
pub mod detail;
pub mod help;
pub mod layout;
pub mod sets;
pub mod study;

use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::Style,
    widgets::Block,
};

use crate::app::state::{AppState, Screen};
use crate::theme::Theme;

/// Main draw function
pub fn draw(frame: &mut Frame, state: &AppState, theme: &Theme) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(theme.bg_primary)), area);

    let [main_area, command_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(area);

    match state.screen {
        Screen::Sets => sets::draw(frame, main_area, state, theme),
        Screen::Detail => detail::draw(frame, main_area, state, theme),
        Screen::Study => study::draw(frame, main_area, state, theme),
        Screen::Help => help::draw(frame, main_area, theme),
    }

    command_line::draw(frame, command_area, &state.command_line, theme);
}
