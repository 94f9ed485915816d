//! Saved sets list

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState},
};

use super::layout::{draw_notice, screen_block};
use crate::app::state::AppState;
use crate::theme::Theme;

/// Draw the saved sets screen
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let block = screen_block(" My Flashcards ", theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if !state.authenticated {
        draw_notice(frame, inner, "Log in with `flashdeck login` to see your saved sets", theme);
        return;
    }

    if state.sets.sets.is_empty() {
        let message = if state.sets.loaded {
            "No saved sets yet. Type :generate <text> to create some"
        } else {
            "Loading..."
        };
        draw_notice(frame, inner, message, theme);
        return;
    }

    let items: Vec<ListItem> = state
        .sets
        .sets
        .iter()
        .map(|set| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    set.topic.clone(),
                    Style::default().fg(theme.fg_secondary).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(set.summary(), Style::default().fg(theme.fg_muted))),
                Line::from(""),
            ])
        })
        .collect();

    let list = List::new(items)
        .highlight_style(Style::default().bg(theme.selection))
        .highlight_symbol("\u{25B8} "); // ▸

    let mut list_state = ListState::default().with_selected(Some(state.sets.selected));
    frame.render_stateful_widget(list, inner, &mut list_state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::{Card, FlashcardSet};
    use crate::ui::test_support::render;
    use chrono::NaiveDate;

    fn state_with_sets(sets: Vec<FlashcardSet>) -> AppState {
        let mut state = AppState { authenticated: true, ..Default::default() };
        state.sets.replace(sets);
        state
    }

    #[test]
    fn lists_topics_with_summaries() {
        let set = FlashcardSet {
            id: 1,
            topic: "Photosynthesis".into(),
            created_at: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap().and_hms_opt(8, 0, 0).unwrap(),
            cards: vec![Card::new("Q", "A")],
            user_id: None,
        };
        let text = render(&state_with_sets(vec![set]), 80, 20);
        assert!(text.contains("Photosynthesis"));
        assert!(text.contains("1 flashcard"));
        assert!(text.contains("Mar 9, 2024"));
    }

    #[test]
    fn empty_list_hints_at_generate() {
        let text = render(&state_with_sets(Vec::new()), 80, 20);
        assert!(text.contains(":generate"));
    }

    #[test]
    fn logged_out_prompts_login() {
        let text = render(&AppState::default(), 80, 20);
        assert!(text.contains("flashdeck login"));
    }
}
