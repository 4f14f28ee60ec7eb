//! Results list rendering.

use crate::state::{AppState, FocusTarget};
use crate::ui::layout::truncate_to_width;
use crate::ui::{palette, theme};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub const NO_MATCHES: &str = "No results match your filters.";

pub fn render(f: &mut Frame, area: Rect, app: &mut AppState) {
    let p = palette();
    let focused = app.is_focused(FocusTarget::Results);

    let border_style = if focused {
        Style::default().fg(p.border_focus)
    } else {
        Style::default().fg(p.border_dim)
    };
    let title = if app.controller.raw_results().is_empty() {
        " Recommended Assessments ".to_string()
    } else {
        format!(
            " Recommended Assessments · {} ",
            app.controller.match_count_label()
        )
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title)
        .style(Style::default().bg(p.surface));

    if app.results().is_empty() {
        let message = Paragraph::new(placeholder(app))
            .wrap(Wrap { trim: true })
            .block(block);
        f.render_widget(message, area);
        return;
    }

    let viewport_height = area.height.saturating_sub(2) as usize; // borders
    app.ui.viewport_height = viewport_height.max(1);
    let total = app.results().len();
    app.ui.update_scroll(app.selected_index, total);

    let results = app.results();
    let selected = app.selected_index;
    let start = app.ui.scroll_offset.min(results.len());
    let end = (start + viewport_height).min(results.len());
    // borders + marker
    let row_width = (area.width as usize).saturating_sub(4);

    let items: Vec<ListItem> = results[start..end]
        .iter()
        .enumerate()
        .map(|(i, result)| {
            let rank = start + i;
            let is_selected = rank == selected;
            let marker = if is_selected { "▸" } else { " " };
            let badge = format!(" {}% Match ", result.match_percent());
            let name_width = row_width.saturating_sub(badge.width() + 1);
            let name = truncate_to_width(&result.name, name_width);
            let padding = name_width.saturating_sub(name.width());

            let line = Line::from(vec![
                Span::styled(marker, Style::default().fg(p.primary)),
                Span::raw(" "),
                Span::styled(name, Style::default().fg(p.text)),
                Span::raw(" ".repeat(padding + 1)),
                Span::styled(
                    badge,
                    Style::default()
                        .fg(theme::rank_color(rank))
                        .add_modifier(Modifier::BOLD),
                ),
            ]);

            let style = if is_selected {
                Style::default().bg(p.elevated)
            } else {
                Style::default()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

fn placeholder(app: &AppState) -> Vec<Line<'static>> {
    let p = palette();
    let muted = Style::default().fg(p.text_muted);

    if app.controller.is_loading() {
        return vec![Line::styled(
            "Searching the catalogue…",
            Style::default()
                .fg(p.text_secondary)
                .add_modifier(Modifier::ITALIC),
        )];
    }
    if let Some(error) = app.controller.error() {
        return vec![
            Line::styled(error.to_string(), Style::default().fg(p.error)),
            Line::raw(""),
            Line::styled("Check the endpoint and press Enter to retry.", muted),
        ];
    }
    if !app.controller.raw_results().is_empty() {
        return vec![
            Line::styled(NO_MATCHES, Style::default().fg(p.text_secondary)),
            Line::raw(""),
            Line::styled("Press c to clear filters.", muted),
        ];
    }
    if app.controller.session().history().is_empty() && app.query().is_empty() {
        return vec![
            Line::styled("Describe a role and press Enter.", muted),
            Line::raw(""),
            Line::styled("Ctrl+E picks an example query.", muted),
        ];
    }
    vec![Line::styled("No assessments to show.", muted)]
}
