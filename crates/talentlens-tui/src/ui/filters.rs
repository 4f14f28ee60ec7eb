//! Filter bar: one selector per criterion.

use crate::state::{AppState, FocusTarget};
use crate::ui::palette;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use talentlens_core::filter::FilterField;
use talentlens_core::FilterValue;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let p = palette();
    let focused = app.is_focused(FocusTarget::Filters);
    let criteria = app.controller.criteria();

    let mut spans = Vec::new();
    for field in FilterField::ALL {
        let value = criteria.get(*field);
        let active = focused && app.filter_field == *field;

        spans.push(Span::styled(
            format!("{}: ", field.label()),
            Style::default().fg(p.text_secondary),
        ));

        let value_style = if active {
            Style::default()
                .fg(p.bg)
                .bg(p.primary)
                .add_modifier(Modifier::BOLD)
        } else if value.is_all() {
            Style::default().fg(p.text)
        } else {
            Style::default().fg(p.accent).add_modifier(Modifier::BOLD)
        };
        spans.push(Span::styled(
            format!(" {} ", value_label(*field, value)),
            value_style,
        ));
        spans.push(Span::raw("   "));
    }

    if !criteria.is_unfiltered() {
        spans.push(Span::styled(
            "c: clear filters",
            Style::default().fg(p.text_muted),
        ));
    }

    let border_style = if focused {
        Style::default().fg(p.border_focus)
    } else {
        Style::default().fg(p.border_dim)
    };

    let bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Filters ")
            .style(Style::default().bg(p.surface)),
    );
    f.render_widget(bar, area);
}

/// Human label for a selector value.
pub fn value_label(field: FilterField, value: &FilterValue) -> String {
    let label = match (field, value) {
        (FilterField::JobLevel, FilterValue::All) => "All Levels",
        (FilterField::Duration, FilterValue::All) => "Any Duration",
        (FilterField::TestType, FilterValue::All) => "All Types",
        (FilterField::JobLevel, FilterValue::Only(v)) => match v.as_str() {
            "Entry" => "Entry Level",
            "Senior" => "Senior / Experienced",
            "Manager" => "Manager / Executive",
            other => other,
        },
        (FilterField::TestType, FilterValue::Only(v)) if v == "Skill" => "Skill Test",
        (_, FilterValue::Only(v)) => v.as_str(),
    };
    label.to_string()
}
