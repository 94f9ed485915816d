//! Detail screen: every card of one set, each flippable on its own

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::layout::{draw_notice, screen_block};
use crate::app::state::{AppState, DetailSource, DetailState};
use crate::deck::card_count_label;
use crate::theme::Theme;

/// Lines each card occupies (label + text + spacer)
const CARD_LINES: usize = 3;

/// Draw the detail screen
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let Some(detail) = state.detail.as_ref() else {
        draw_notice(frame, area, "Nothing to show", theme);
        return;
    };

    let title = format!(" {} ", detail.topic);
    let block = screen_block(&title, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [meta_area, cards_area, hints_area] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(1), Constraint::Length(1)])
            .areas(inner);

    frame.render_widget(Paragraph::new(meta_line(detail, theme)), meta_area);

    let visible_cards = (cards_area.height as usize / CARD_LINES).max(1);
    let first = detail.selected.saturating_sub(visible_cards - 1);
    let lines: Vec<Line> = detail
        .cards
        .iter()
        .enumerate()
        .skip(first)
        .flat_map(|(i, card)| {
            let revealed = detail.revealed.get(i).copied().unwrap_or(false);
            let selected = i == detail.selected;
            let label = if revealed { "Answer" } else { "Question" };
            let text = if revealed { &card.answer } else { &card.question };

            let marker = if selected { "\u{25B8} " } else { "  " };
            let text_style = if selected {
                Style::default().fg(theme.fg_secondary).bg(theme.selection)
            } else {
                Style::default().fg(theme.fg_primary)
            };

            [
                Line::from(vec![
                    Span::styled(marker, Style::default().fg(theme.accent_primary)),
                    Span::styled(
                        format!("{}. {}", i + 1, label),
                        Style::default().fg(theme.face(revealed)).add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(Span::styled(format!("   {}", text), text_style)),
                Line::from(""),
            ]
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), cards_area);

    let hints = Line::from(Span::styled(
        "[j/k] Select    [Space] Flip    [s] Study    [Esc] Back",
        Style::default().fg(theme.fg_muted),
    ));
    frame.render_widget(Paragraph::new(hints), hints_area);
}

fn meta_line(detail: &DetailState, theme: &Theme) -> Line<'static> {
    match &detail.source {
        DetailSource::Saved { summary, .. } => {
            Line::from(Span::styled(summary.clone(), Style::default().fg(theme.fg_muted)))
        }
        DetailSource::Generated => Line::from(vec![
            Span::styled(card_count_label(detail.cards.len()), Style::default().fg(theme.fg_muted)),
            Span::styled(
                " · not saved yet, use :save <title>",
                Style::default().fg(theme.info),
            ),
        ]),
    }
}
