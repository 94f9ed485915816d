//! Key reference

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use super::layout::{centered_rect, screen_block};
use crate::theme::Theme;

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Study",
        &[
            ("\u{2190} / \u{2192}", "Previous / next card"),
            ("Space", "Show answer / question"),
            ("1-9", "Jump to card"),
            ("Esc", "Leave study mode"),
        ],
    ),
    (
        "Sets and cards",
        &[
            ("j / k", "Move selection"),
            ("Enter", "Open set"),
            ("Space", "Flip selected card"),
            ("s", "Study"),
            ("r", "Refresh saved sets"),
        ],
    ),
    (
        "Commands",
        &[
            (":generate <text>", "Generate flashcards"),
            (":save <title>", "Save shown flashcards"),
            (":logout", "Forget the access token"),
            (":q", "Quit"),
        ],
    ),
];

/// Draw the help overlay
pub fn draw(frame: &mut Frame, area: Rect, theme: &Theme) {
    let overlay = centered_rect(70, 80, area);
    frame.render_widget(Clear, overlay);

    let block = screen_block(" Help ", theme);
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let mut lines = Vec::new();
    for (heading, keys) in SECTIONS {
        lines.push(Line::from(Span::styled(
            *heading,
            Style::default().fg(theme.accent_secondary).add_modifier(Modifier::BOLD),
        )));
        for (key, description) in *keys {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<18}", key), Style::default().fg(theme.accent_primary)),
                Span::styled(*description, Style::default().fg(theme.fg_primary)),
            ]));
        }
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled("[Esc] Close", Style::default().fg(theme.fg_muted))));

    frame.render_widget(Paragraph::new(lines), inner);
}
