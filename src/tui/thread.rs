//! Thread pane: one contact's messages in chronological order.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use unicode_width::UnicodeWidthStr;

use crate::models::{Conversation, Direction};

/// Render the thread pane for the selected conversation.
///
/// `scroll_from_bottom` is measured in lines above the bottom of the thread
/// (0 = stick to the newest message), so new messages never require scroll
/// bookkeeping in the caller.
pub fn render(
    area: Rect,
    buf: &mut Buffer,
    conversation: Option<&Conversation>,
    scroll_from_bottom: usize,
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

    let title = match conversation {
        Some(conv) => format!(" {} ", conv.contact_number),
        None => " Thread ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style);

    let inner = block.inner(area);
    block.render(area, buf);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let conv = match conversation {
        Some(c) => c,
        None => {
            let line = Line::from(Span::styled(
                " Select a conversation",
                Style::default().fg(Color::DarkGray),
            ));
            Paragraph::new(line).render(Rect::new(inner.x, inner.y, inner.width, 1), buf);
            return;
        }
    };

    let lines = build_thread_lines(conv, inner.width as usize);
    let total_lines = lines.len();
    let visible_height = inner.height as usize;

    // Anchor at the bottom, then move up by the requested amount.
    let max_scroll = total_lines.saturating_sub(visible_height);
    let from_bottom = scroll_from_bottom.min(max_scroll);
    let start = max_scroll - from_bottom;

    for (row, line_idx) in (start..total_lines).take(visible_height).enumerate() {
        let y = inner.y + row as u16;
        let line_area = Rect::new(inner.x, y, inner.width, 1);
        Paragraph::new(lines[line_idx].clone()).render(line_area, buf);
    }

    // Scroll indicators.
    if total_lines > visible_height {
        let indicator_x = inner.x + inner.width.saturating_sub(1);
        if start > 0 {
            let cell = &mut buf[(indicator_x, inner.y)];
            cell.set_char('^');
            cell.set_style(Style::default().fg(Color::DarkGray));
        }
        if start + visible_height < total_lines {
            let bottom_y = inner.y + inner.height.saturating_sub(1);
            let cell = &mut buf[(indicator_x, bottom_y)];
            cell.set_char('v');
            cell.set_style(Style::default().fg(Color::DarkGray));
        }
    }
}

/// Build the flat line buffer for a conversation, oldest message first.
fn build_thread_lines(conv: &Conversation, width: usize) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();
    let content_width = width.saturating_sub(6);
    if content_width == 0 {
        return lines;
    }

    for msg in &conv.messages {
        let (arrow, who, header_style) = match msg.direction {
            Direction::Inbound => (
                "<-",
                conv.contact_number.as_str(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Direction::Outbound => (
                "->",
                "you",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} {}", arrow, who), header_style),
            Span::styled(
                format!("  {}", msg.created_at.format("%Y-%m-%d %H:%M")),
                Style::default().fg(Color::DarkGray),
            ),
        ]));

        let body_style = match msg.direction {
            Direction::Inbound => Style::default().fg(Color::Gray),
            Direction::Outbound => Style::default().fg(Color::Cyan),
        };
        for text_line in wrap_text(&msg.text, content_width) {
            lines.push(Line::from(Span::styled(
                format!("    {}", text_line),
                body_style,
            )));
        }

        // Delivery status on outbound messages.
        if msg.direction == Direction::Outbound && !msg.status.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("    [{}]", msg.status),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            )));
        }

        lines.push(Line::from(""));
    }

    lines
}

/// Simple word-wrapping: split content by newlines first, then wrap long
/// lines on word boundaries. Widths are display columns, not bytes.
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![];
    }
    let mut result = Vec::new();
    for line in text.lines() {
        if line.width() <= max_width {
            result.push(line.to_string());
        } else {
            let words: Vec<&str> = line.split_whitespace().collect();
            let mut current = String::new();
            for word in words {
                if current.is_empty() {
                    current = word.to_string();
                } else if current.width() + 1 + word.width() <= max_width {
                    current.push(' ');
                    current.push_str(word);
                } else {
                    result.push(current);
                    current = word.to_string();
                }
            }
            if !current.is_empty() {
                result.push(current);
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_short_line_unchanged() {
        assert_eq!(wrap_text("hello", 20), vec!["hello"]);
    }

    #[test]
    fn test_wrap_splits_on_words() {
        let wrapped = wrap_text("see you tomorrow at three", 10);
        assert_eq!(wrapped, vec!["see you", "tomorrow", "at three"]);
    }

    #[test]
    fn test_wrap_preserves_newlines() {
        let wrapped = wrap_text("first\nsecond", 20);
        assert_eq!(wrapped, vec!["first", "second"]);
    }

    #[test]
    fn test_wrap_zero_width() {
        assert!(wrap_text("anything", 0).is_empty());
    }
}
