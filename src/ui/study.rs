//! Study screen: one card at a time

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::layout::{draw_notice, screen_block};
use crate::app::state::AppState;
use crate::study::CardView;
use crate::theme::Theme;

/// Draw the study screen
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let Some(session) = state.study.as_ref() else {
        draw_notice(frame, area, "No study session", theme);
        return;
    };

    let title = format!(" Studying: {} ", session.topic());
    let block = screen_block(&title, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let view = session.current();

    let [progress_area, card_area, dots_area, hints_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(5),
        Constraint::Length(2),
        Constraint::Length(1),
    ])
    .areas(inner);

    let progress = Paragraph::new(Line::from(Span::styled(
        view.progress(),
        Style::default().fg(theme.fg_muted),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(progress, progress_area);

    draw_card(frame, card_area, &view, theme);

    frame.render_widget(
        Paragraph::new(dots_line(&view, theme)).alignment(Alignment::Center),
        dots_area,
    );
    frame.render_widget(
        Paragraph::new(hints_line(&view, theme)).alignment(Alignment::Center),
        hints_area,
    );
}

/// The card itself: label as the title, visible face as the body
fn draw_card(frame: &mut Frame, area: Rect, view: &CardView<'_>, theme: &Theme) {
    let face = theme.face(view.revealed);
    let label = format!(" {} ", view.label());

    let block = Block::default()
        .title(Span::styled(label, Style::default().fg(face).add_modifier(Modifier::BOLD)))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(face))
        .style(Style::default().bg(theme.bg_secondary));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Vertically center short bodies
    let wrapped = view.body().chars().count() / inner.width.max(1) as usize + 1;
    let body_height = wrapped.min(inner.height as usize) as u16;
    let top_pad = inner.height.saturating_sub(body_height) / 2;
    let [_, body_area] =
        Layout::vertical([Constraint::Length(top_pad), Constraint::Min(1)]).areas(inner);

    let body = Paragraph::new(view.body())
        .style(Style::default().fg(theme.fg_secondary))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(body, body_area);
}

/// Position dots, current card highlighted
fn dots_line(view: &CardView<'_>, theme: &Theme) -> Line<'static> {
    let spans: Vec<Span> = (1..=view.total)
        .map(|position| {
            if position == view.index {
                Span::styled("\u{25CF} ", Style::default().fg(theme.accent_primary)) // ●
            } else {
                Span::styled("\u{25CB} ", Style::default().fg(theme.fg_muted)) // ○
            }
        })
        .collect();
    Line::from(spans)
}

/// Key hints, with the step hints muted at the matching edge
fn hints_line(view: &CardView<'_>, theme: &Theme) -> Line<'static> {
    let enabled = Style::default().fg(theme.fg_primary);
    let disabled = Style::default().fg(theme.fg_muted).add_modifier(Modifier::DIM);

    Line::from(vec![
        Span::styled("[\u{2190}] Previous", if view.at_start { disabled } else { enabled }),
        Span::raw("    "),
        Span::styled(format!("[Space] {}", view.reveal_hint()), Style::default().fg(theme.info)),
        Span::raw("    "),
        Span::styled("[\u{2192}] Next", if view.at_end { disabled } else { enabled }),
        Span::raw("    "),
        Span::styled("[Esc] Back", Style::default().fg(theme.fg_muted)),
    ])
}
