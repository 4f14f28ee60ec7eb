//! Detail pane for the selected result.

use crate::state::AppState;
use crate::ui::palette;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use talentlens_core::ResultItem;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let p = palette();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(p.border_dim))
        .title(" Details ")
        .style(Style::default().bg(p.surface));

    let lines = match app.selected_result() {
        Some(item) => detail_lines(item),
        None => vec![Line::styled(
            "Select a result to see its details.",
            Style::default().fg(p.text_muted),
        )],
    };

    let detail = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(block);
    f.render_widget(detail, area);
}

fn detail_lines(item: &ResultItem) -> Vec<Line<'static>> {
    let p = palette();
    let label = Style::default().fg(p.text_secondary);
    let value = Style::default().fg(p.text);
    let field = |name: &'static str, text: String| {
        Line::from(vec![
            Span::styled(format!("{name:<14}"), label),
            Span::styled(text, value),
        ])
    };

    let mut lines = vec![
        Line::styled(
            item.name.clone(),
            Style::default().fg(p.primary).add_modifier(Modifier::BOLD),
        ),
        Line::styled(
            item.url.clone(),
            Style::default()
                .fg(p.info)
                .add_modifier(Modifier::UNDERLINED),
        ),
        Line::raw(""),
        field("Match", format!("{}%", item.match_percent())),
        field("Duration", or_fallback(&item.duration, "N/A")),
        field("Job level", or_fallback(&item.job_level, "Any Level")),
        field("Test type", or_fallback(&item.test_type, "-")),
    ];

    if !item.languages.is_empty() {
        lines.push(field("Languages", item.languages.join(", ")));
    }
    if let Some(remote) = &item.remote_testing {
        lines.push(field("Remote", remote.clone()));
    }
    if let Some(adaptive) = &item.adaptive_support {
        lines.push(field("Adaptive/IRT", adaptive.clone()));
    }

    if !item.description.trim().is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::styled(item.description.trim().to_string(), value));
    }

    let insights = item.insight_lines();
    if !insights.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "✦ AI Analysis",
            Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
        ));
        for insight in insights {
            lines.push(Line::from(vec![
                Span::styled("  • ", Style::default().fg(p.accent)),
                Span::styled(insight.to_string(), value),
            ]));
        }
    }

    lines
}

fn or_fallback(value: &Option<String>, fallback: &str) -> String {
    value.clone().unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flatten(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| &*s.content).collect())
            .collect()
    }

    #[test]
    fn missing_fields_use_fallbacks_and_insights_become_bullets() {
        let item = ResultItem {
            name: "Core Java".into(),
            url: "https://catalog.test/core-java".into(),
            description: "Java fundamentals.".into(),
            score: 0.873,
            duration: None,
            job_level: None,
            test_type: Some("Skill".into()),
            ai_insights: Some("Strong OOP coverage\n\n  Short and adaptive  ".into()),
            languages: vec!["English".into(), "French".into()],
            remote_testing: Some("Yes".into()),
            adaptive_support: None,
        };

        let text = flatten(&detail_lines(&item));
        assert!(text.iter().any(|l| l.starts_with("Match") && l.ends_with("87%")));
        assert!(text.iter().any(|l| l.ends_with("N/A")));
        assert!(text.iter().any(|l| l.ends_with("Any Level")));
        assert!(text.iter().any(|l| l.ends_with("English, French")));
        assert!(!text.iter().any(|l| l.starts_with("Adaptive")));

        let bullets: Vec<_> = text.iter().filter(|l| l.starts_with("  • ")).collect();
        assert_eq!(
            bullets,
            ["  • Strong OOP coverage", "  • Short and adaptive"]
        );
    }
}
