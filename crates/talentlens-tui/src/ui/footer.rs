//! Footer / status bar rendering.

use crate::state::{AppState, FocusTarget};
use crate::ui::palette;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let p = palette();
    let key = Style::default().fg(p.primary);
    let hint = Style::default().fg(p.text_secondary);

    let mut spans = vec![Span::styled("Tab:", key), Span::styled(" focus  ", hint)];

    let focus_hints: &[(&str, &str)] = match app.focus {
        FocusTarget::Input => &[("↵:", " search  "), ("Ctrl+E:", " examples  ")],
        FocusTarget::History => &[("←/→:", " pick  "), ("↵:", " run  "), ("x:", " clear  ")],
        FocusTarget::Filters => &[
            ("←/→:", " field  "),
            ("↑/↓:", " value  "),
            ("c:", " clear  "),
        ],
        FocusTarget::Results => &[
            ("j/k:", " ↑↓  "),
            ("o:", " open  "),
            ("c:", " clear filters  "),
        ],
    };
    for (k, h) in focus_hints {
        spans.push(Span::styled(*k, key));
        spans.push(Span::styled(*h, hint));
    }

    spans.extend(vec![
        Span::styled("Ctrl+T:", key),
        Span::styled(" theme  ", hint),
        Span::styled("Ctrl+A:", key),
        Span::styled(" AI  ", hint),
        Span::styled("?:", key),
        Span::styled(" help  ", hint),
        Span::styled("Ctrl-C:", key),
        Span::styled(" quit", hint),
    ]);

    if let Some(msg) = &app.status {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            msg.as_str(),
            Style::default().fg(p.info).add_modifier(Modifier::BOLD),
        ));
    } else if let Some(error) = app.controller.error() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            error,
            Style::default().fg(p.error).add_modifier(Modifier::BOLD),
        ));
    }

    let hints = Paragraph::new(Line::from(spans)).style(Style::default().bg(p.surface));
    f.render_widget(hints, area);
}
