//! Conversations sidebar: per-contact threads sorted by latest activity.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::models::{Conversation, Direction};

/// Rows used per conversation: contact line + preview line.
const ROWS_PER_ITEM: usize = 2;

/// Render the conversations sidebar into the given area.
pub fn render(
    area: Rect,
    buf: &mut Buffer,
    conversations: &[Conversation],
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
        .title(" Conversations ")
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style);

    let inner = block.inner(area);
    block.render(area, buf);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    if conversations.is_empty() {
        let text = if loading { " Loading..." } else { " (no conversations)" };
        let line = Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)));
        Paragraph::new(line).render(Rect::new(inner.x, inner.y, inner.width, 1), buf);
        return;
    }

    let visible_items = (inner.height as usize) / ROWS_PER_ITEM;
    if visible_items == 0 {
        return;
    }

    let scroll = compute_scroll_offset(selected, visible_items, conversations.len());

    for (slot, item_idx) in (scroll..conversations.len()).take(visible_items).enumerate() {
        let conv = &conversations[item_idx];
        let y = inner.y + (slot * ROWS_PER_ITEM) as u16;
        let is_selected = item_idx == selected;

        render_contact_row(
            Rect::new(inner.x, y, inner.width, 1),
            buf,
            conv,
            is_selected,
        );
        render_preview_row(
            Rect::new(inner.x, y + 1, inner.width, 1),
            buf,
            conv,
            is_selected,
        );
    }
}

/// First row: cursor, contact number, latest-activity time right-aligned.
fn render_contact_row(area: Rect, buf: &mut Buffer, conv: &Conversation, selected: bool) {
    let cursor = if selected { "\u{25BA}" } else { " " };
    let label = format!("{} {}", cursor, conv.contact_number);
    let badge = conv.latest.created_at.format("%H:%M").to_string();

    let style = if selected {
        Style::default()
            .fg(Color::White)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let badge_style = if selected {
        Style::default().fg(Color::Yellow).bg(Color::DarkGray)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    render_row(buf, area, &label, &badge, style, badge_style);
}

/// Second row: direction tag plus truncated latest message text.
fn render_preview_row(area: Rect, buf: &mut Buffer, conv: &Conversation, selected: bool) {
    let tag = match conv.latest.direction {
        Direction::Inbound => "In",
        Direction::Outbound => "Out",
    };
    let text = conv.latest.text.replace('\n', " ");
    let label = format!("   {}: {}", tag, text);

    let style = if selected {
        Style::default().fg(Color::Gray).bg(Color::DarkGray)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    render_row(buf, area, &label, "", style, style);
}

/// Render a row with left-aligned text and an optional right-aligned badge.
fn render_row(
    buf: &mut Buffer,
    area: Rect,
    left: &str,
    badge: &str,
    text_style: Style,
    badge_style: Style,
) {
    let width = area.width as usize;
    if width == 0 {
        return;
    }

    // Truncate left text if needed, leaving room for badge + 1 space
    let badge_len = badge.len();
    let max_left = if badge_len > 0 {
        width.saturating_sub(badge_len + 1)
    } else {
        width
    };

    let left_truncated: String = left.chars().take(max_left).collect();
    let left_len = left_truncated.chars().count();

    let pad = if badge_len > 0 {
        width.saturating_sub(left_len + badge_len)
    } else {
        width.saturating_sub(left_len)
    };

    let line = Line::from(vec![
        Span::styled(left_truncated, text_style),
        Span::styled(" ".repeat(pad), text_style),
        Span::styled(badge.to_string(), badge_style),
    ]);

    Paragraph::new(line).render(area, buf);
}

/// Simple scroll offset: keep selected item visible.
pub fn compute_scroll_offset(selected: usize, height: usize, total: usize) -> usize {
    if total <= height {
        return 0;
    }
    if selected < height {
        return 0;
    }
    let max_offset = total.saturating_sub(height);
    let offset = selected.saturating_sub(height - 1);
    offset.min(max_offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_offset_fits() {
        assert_eq!(compute_scroll_offset(3, 10, 5), 0);
    }

    #[test]
    fn test_scroll_offset_follows_selection() {
        // 20 items, 5 visible: selecting item 12 scrolls so it is the last row.
        assert_eq!(compute_scroll_offset(12, 5, 20), 8);
        // Selection within the first page needs no scroll.
        assert_eq!(compute_scroll_offset(2, 5, 20), 0);
    }

    #[test]
    fn test_scroll_offset_clamped_at_end() {
        assert_eq!(compute_scroll_offset(19, 5, 20), 15);
    }
}
