//! Header rendering.

use crate::state::AppState;
use crate::ui::palette;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use talentlens_core::build_info::BUILD_INFO;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let p = palette();
    let session = app.controller.session();
    let use_ai = app.controller.use_ai();

    let sep = Span::styled(" | ", Style::default().fg(p.text_muted));
    let (ai_text, ai_color) = if use_ai {
        ("AI insights on", p.accent)
    } else {
        ("AI insights off", p.text_muted)
    };

    let mut spans = vec![
        Span::styled(
            "talentlens",
            Style::default().fg(p.primary).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  assessment recommender",
            Style::default().fg(p.text_secondary),
        ),
        sep.clone(),
        Span::styled("◐ ", Style::default().fg(p.info)),
        Span::styled(session.theme().as_str(), Style::default().fg(p.info)),
        sep.clone(),
        Span::styled("✦ ", Style::default().fg(ai_color)),
        Span::styled(ai_text, Style::default().fg(ai_color)),
    ];

    if app.controller.is_loading() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            "searching…",
            Style::default()
                .fg(p.warning)
                .add_modifier(Modifier::ITALIC),
        ));
    }

    let build_info = BUILD_INFO.compact();
    let build_width = (build_info.len() as u16).min(area.width.saturating_sub(2));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(p.border_dim))
        .style(Style::default().bg(p.surface));
    let inner = block.inner(area);

    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(build_width)])
        .split(inner);

    let left = Paragraph::new(Line::from(spans)).style(Style::default().bg(p.surface));
    let right = Paragraph::new(build_info)
        .style(
            Style::default()
                .fg(p.text_muted)
                .bg(p.surface)
                .add_modifier(Modifier::DIM),
        )
        .alignment(Alignment::Right);

    f.render_widget(left, chunks[0]);
    f.render_widget(right, chunks[1]);
}
