//! Search input rendering.

use crate::state::{AppState, FocusTarget};
use crate::ui::palette;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

const PROMPT: &str = "Role: ";
const PLACEHOLDER: &str = "Describe the role... (e.g. Senior Java Developer with AWS)";

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let p = palette();
    let is_focused = app.is_focused(FocusTarget::Input);

    let border_style = if is_focused {
        Style::default().fg(p.border_focus)
    } else {
        Style::default().fg(p.border_dim)
    };

    // 2 for the borders.
    let available = (area.width as usize).saturating_sub(2 + PROMPT.len());
    let (visible, cursor_col) = visible_window(app.query(), app.cursor, available);

    let text = if app.query().is_empty() {
        Span::styled(PLACEHOLDER, Style::default().fg(p.text_muted))
    } else {
        Span::styled(visible, Style::default().fg(p.text))
    };

    let input = Paragraph::new(Line::from(vec![
        Span::styled(PROMPT, Style::default().fg(p.accent)),
        text,
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Search ")
            .style(if is_focused {
                Style::default().bg(p.elevated)
            } else {
                Style::default().bg(p.surface)
            }),
    );

    f.render_widget(input, area);

    if is_focused {
        let cursor_x = area.x + 1 + PROMPT.len() as u16 + cursor_col as u16;
        let cursor_y = area.y + 1;
        f.set_cursor_position((cursor_x, cursor_y));
    }
}

/// The slice of `query` that fits in `width` columns with the cursor (a char
/// index) in view, and the cursor's column within that slice.
pub fn visible_window(query: &str, cursor: usize, width: usize) -> (String, usize) {
    let chars: Vec<char> = query.chars().collect();
    let cursor = cursor.min(chars.len());
    let width = width.max(1);
    let col = |c: &char| c.width().unwrap_or(0);

    // Drop leading chars until the cursor column fits.
    let mut start = 0;
    let mut before: usize = chars[..cursor].iter().map(col).sum();
    while before >= width && start < cursor {
        before -= col(&chars[start]);
        start += 1;
    }

    let mut used = 0;
    let visible: String = chars[start..]
        .iter()
        .take_while(|c| {
            used += col(*c);
            used <= width
        })
        .collect();

    (visible, before)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_query_is_shown_whole() {
        assert_eq!(visible_window("java", 2, 20), ("java".to_string(), 2));
    }

    #[test]
    fn long_query_scrolls_to_cursor() {
        let (visible, col) = visible_window("abcdefghij", 10, 4);
        assert_eq!(visible, "hij");
        assert_eq!(col, 3);

        let (visible, col) = visible_window("abcdefghij", 0, 4);
        assert_eq!(visible, "abcd");
        assert_eq!(col, 0);
    }
}
