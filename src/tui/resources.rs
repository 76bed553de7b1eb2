//! Resources pane: the tenant's bookable entities.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use super::sidebar::compute_scroll_offset;
use crate::models::Resource;

/// Render the resources pane into the given area.
pub fn render(
    area: Rect,
    buf: &mut Buffer,
    resources: &[Resource],
    selected: usize,
    loading: bool,
    focused: bool,
) {
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let border_type = if focused {
        BorderType::Double
    } else {
        BorderType::Plain
    };

    let block = Block::default()
        .title(" Resources ")
        .title_bottom(Line::from(Span::styled(
            " a: add  d: delete ",
            Style::default().fg(Color::DarkGray),
        )))
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style);

    let inner = block.inner(area);
    block.render(area, buf);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    if resources.is_empty() {
        let text = if loading { " Loading..." } else { " (no resources)" };
        let line = Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)));
        Paragraph::new(line).render(Rect::new(inner.x, inner.y, inner.width, 1), buf);
        return;
    }

    let visible = inner.height as usize;
    let scroll = compute_scroll_offset(selected, visible, resources.len());

    for (row, item_idx) in (scroll..resources.len()).take(visible).enumerate() {
        let res = &resources[item_idx];
        let y = inner.y + row as u16;
        let is_selected = item_idx == selected;

        let cursor = if is_selected { "\u{25BA}" } else { " " };
        let label = match res.description {
            Some(ref desc) if !desc.is_empty() => {
                format!("{} {} - {}", cursor, res.name, desc)
            }
            _ => format!("{} {}", cursor, res.name),
        };
        let truncated: String = label.chars().take(inner.width as usize).collect();

        let style = if is_selected {
            Style::default()
                .fg(Color::White)
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        Paragraph::new(Line::from(Span::styled(truncated, style)))
            .render(Rect::new(inner.x, y, inner.width, 1), buf);
    }
}
