//! Key mapping per screen

use crossterm::event::{KeyCode, KeyModifiers};

/// Actions that can be taken in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Study navigation
    Previous,
    Next,
    ToggleReveal,
    /// Jump to a 0-based card position
    Jump(usize),

    // List navigation
    Up,
    Down,
    Select,
    Back,

    // Screen actions
    Study,
    Refresh,
    Command,
    Help,
    Quit,
}

/// Study screen keys: arrows step, space flips, digits jump
pub fn study_key_to_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Left => Some(Action::Previous),
        KeyCode::Right => Some(Action::Next),
        KeyCode::Char(' ') => Some(Action::ToggleReveal),
        KeyCode::Char(c @ '1'..='9') => Some(Action::Jump(c as usize - '1' as usize)),
        KeyCode::Esc | KeyCode::Backspace => Some(Action::Back),
        KeyCode::Char(':') => Some(Action::Command),
        KeyCode::Char('?') => Some(Action::Help),
        _ => None,
    }
}

/// Vim-style h/l aliases for study navigation
fn vim_study_key(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('h') => Some(Action::Previous),
        KeyCode::Char('l') => Some(Action::Next),
        _ => None,
    }
}

/// Sets and detail screen keys
pub fn list_key_to_action(key: KeyCode, vim_mode: bool) -> Option<Action> {
    match key {
        KeyCode::Down => Some(Action::Down),
        KeyCode::Up => Some(Action::Up),
        KeyCode::Char('j') if vim_mode => Some(Action::Down),
        KeyCode::Char('k') if vim_mode => Some(Action::Up),
        KeyCode::Enter => Some(Action::Select),
        KeyCode::Char(' ') => Some(Action::ToggleReveal),
        KeyCode::Esc => Some(Action::Back),
        KeyCode::Char('s') => Some(Action::Study),
        KeyCode::Char('r') => Some(Action::Refresh),
        KeyCode::Char(':') => Some(Action::Command),
        KeyCode::Char('?') => Some(Action::Help),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

/// Key mapping for the study screen, honoring vim mode and Ctrl-C
pub fn study_key_with_modifiers(
    key: KeyCode,
    modifiers: KeyModifiers,
    vim_mode: bool,
) -> Option<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match key {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }
    study_key_to_action(key).or_else(|| if vim_mode { vim_study_key(key) } else { None })
}

/// Key mapping for list screens, honoring Ctrl-C
pub fn list_key_with_modifiers(
    key: KeyCode,
    modifiers: KeyModifiers,
    vim_mode: bool,
) -> Option<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match key {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }
    list_key_to_action(key, vim_mode)
}
