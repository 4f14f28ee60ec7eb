//! Recent-search chips.

use crate::state::{AppState, FocusTarget};
use crate::ui::layout::truncate_to_width;
use crate::ui::palette;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const CHIP_WIDTH: usize = 28;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let p = palette();
    let focused = app.is_focused(FocusTarget::History);

    let mut spans = vec![Span::styled(
        " RECENT: ",
        Style::default()
            .fg(p.text_secondary)
            .add_modifier(Modifier::BOLD),
    )];

    for (i, entry) in app.controller.session().history().iter().enumerate() {
        let style = if focused && i == app.history_index {
            Style::default()
                .fg(p.bg)
                .bg(p.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(p.text).bg(p.elevated)
        };
        spans.push(Span::styled(
            format!(" {} ", truncate_to_width(entry, CHIP_WIDTH)),
            style,
        ));
        spans.push(Span::raw(" "));
    }

    if focused {
        spans.push(Span::styled(
            " ↵ run  x clear",
            Style::default().fg(p.text_muted),
        ));
    }

    f.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(p.surface)),
        area,
    );
}
