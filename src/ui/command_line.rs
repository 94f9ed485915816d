//! Command line UI component

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::state::{CommandLineState, CommandMode};
use crate::theme::Theme;

/// Draw the command line at the bottom of the screen
pub fn draw(frame: &mut Frame, area: Rect, state: &CommandLineState, theme: &Theme) {
    let line = match state.mode {
        CommandMode::Normal => match state.message.as_deref() {
            Some(msg) => {
                let color = if state.is_error { theme.error } else { theme.success };
                Line::from(Span::styled(msg.to_string(), Style::default().fg(color)))
            }
            None => Line::from(Span::styled(
                "Press : for commands, ? for help",
                Style::default().fg(theme.fg_muted),
            )),
        },
        CommandMode::Command => {
            let text = format!(":{}", state.input);
            let style = Style::default().fg(theme.accent_primary);
            with_cursor(&text, state.cursor + 1, style, theme) // +1 for ':'
        }
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// Split text around a block cursor at a character position
fn with_cursor(text: &str, cursor_pos: usize, base_style: Style, theme: &Theme) -> Line<'static> {
    let before: String = text.chars().take(cursor_pos).collect();
    let under = text.chars().nth(cursor_pos).unwrap_or(' ');
    let after: String = text.chars().skip(cursor_pos + 1).collect();

    let cursor_style =
        Style::default().fg(theme.bg_primary).bg(theme.fg_primary).add_modifier(Modifier::BOLD);

    let mut spans = Vec::with_capacity(3);
    if !before.is_empty() {
        spans.push(Span::styled(before, base_style));
    }
    spans.push(Span::styled(under.to_string(), cursor_style));
    if !after.is_empty() {
        spans.push(Span::styled(after, base_style));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_at_end_adds_blank_cell() {
        let theme = Theme::default();
        let line = with_cursor(":save", 5, Style::default(), &theme);
        assert_eq!(line.spans.len(), 2);
        assert_eq!(line.spans[1].content, " ");
    }

    #[test]
    fn cursor_in_middle_splits_three_ways() {
        let theme = Theme::default();
        let line = with_cursor(":save", 2, Style::default(), &theme);
        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[1].content, "a");
    }

    #[test]
    fn cursor_at_start() {
        let theme = Theme::default();
        let line = with_cursor(":q", 0, Style::default(), &theme);
        assert_eq!(line.spans.len(), 2);
    }
}
