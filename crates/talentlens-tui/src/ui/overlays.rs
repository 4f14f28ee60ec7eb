//! Overlay rendering (help, example picker).

use crate::state::{AppState, EXAMPLE_QUERIES};
use crate::ui::layout::centered_rect;
use crate::ui::palette;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

pub fn render_help(f: &mut Frame) {
    let p = palette();
    let help_text = [
        "talentlens: find assessments for a role description",
        "",
        "Focus:",
        "  Tab / Shift+Tab   Cycle input / recent / filters / results",
        "  ↓ (in input)      Move to results",
        "  ↑ (at top)        Move to input",
        "  Esc               Clear query / back to input",
        "",
        "Search:",
        "  Enter             Search (ignored while a search runs)",
        "  Ctrl+E            Pick an example query",
        "  Ctrl+A            Toggle AI insights for the next search",
        "",
        "Recent searches:",
        "  ← / →             Pick a chip",
        "  Enter             Run it again",
        "  x                 Clear history",
        "",
        "Filters:",
        "  ← / →             Choose Level / Duration / Type",
        "  ↑ / ↓ / Space     Change value",
        "  c                 Clear all filters",
        "",
        "Results:",
        "  j / k             Down / Up",
        "  g / G             Top / Bottom",
        "  o / Enter         Open assessment in browser",
        "",
        "Ctrl+T toggles light/dark, Ctrl+C quits.",
        "",
        "Press Esc to close",
    ];

    let help = Paragraph::new(help_text.join("\n"))
        .style(Style::default().fg(p.text).bg(p.bg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(p.primary))
                .title(" Help ")
                .style(Style::default().bg(p.bg)),
        );

    let area = centered_rect(70, 85, f.area());
    f.render_widget(Clear, area);
    f.render_widget(help, area);
}

pub fn render_examples(f: &mut Frame, app: &AppState) {
    let p = palette();
    let area = centered_rect(70, 60, f.area());
    f.render_widget(Clear, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let items: Vec<ListItem> = EXAMPLE_QUERIES
        .iter()
        .enumerate()
        .map(|(i, example)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{}. ", i + 1), Style::default().fg(p.accent)),
                Span::styled(*example, Style::default().fg(p.text)),
            ]))
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(app.example_index));

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(p.primary))
                .title(" Example queries ")
                .style(Style::default().bg(p.bg)),
        )
        .highlight_style(
            Style::default()
                .bg(p.elevated)
                .fg(p.primary)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    f.render_stateful_widget(list, chunks[0], &mut state);

    let hint = Paragraph::new(" ↑/↓ choose  ↵ use  Esc cancel")
        .style(Style::default().fg(p.text_muted).bg(p.bg))
        .wrap(Wrap { trim: true });
    f.render_widget(hint, chunks[1]);
}
