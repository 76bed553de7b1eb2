//! Help popup overlay: keyboard shortcuts organized by category.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Popup dimensions.
const POPUP_WIDTH: u16 = 72;
const POPUP_HEIGHT: u16 = 18;

/// A shortcut entry: key binding and its description.
struct Shortcut {
    key: &'static str,
    desc: &'static str,
}

/// A category of shortcuts with a title.
struct Category {
    title: &'static str,
    shortcuts: &'static [Shortcut],
}

const NAVIGATION: Category = Category {
    title: "NAVIGATION",
    shortcuts: &[
        Shortcut {
            key: "Up/Down",
            desc: "Move within pane",
        },
        Shortcut {
            key: "Tab",
            desc: "Cycle focus forward",
        },
        Shortcut {
            key: "Shift+Tab",
            desc: "Cycle focus backward",
        },
        Shortcut {
            key: "G",
            desc: "Jump thread to newest",
        },
    ],
};

const ACTIONS: Category = Category {
    title: "ACTIONS",
    shortcuts: &[
        Shortcut {
            key: "r",
            desc: "Reload messages and resources",
        },
        Shortcut {
            key: "s",
            desc: "Open settings",
        },
        Shortcut {
            key: "a",
            desc: "Add resource (resources pane)",
        },
        Shortcut {
            key: "d",
            desc: "Delete resource (resources pane)",
        },
    ],
};

const FORMS: Category = Category {
    title: "FORMS",
    shortcuts: &[
        Shortcut {
            key: "Tab/Down",
            desc: "Next field",
        },
        Shortcut {
            key: "Shift+Tab/Up",
            desc: "Previous field",
        },
        Shortcut {
            key: "Enter",
            desc: "Submit",
        },
        Shortcut {
            key: "Ctrl+U",
            desc: "Clear field",
        },
        Shortcut {
            key: "Esc",
            desc: "Cancel",
        },
    ],
};

const GENERAL: Category = Category {
    title: "GENERAL",
    shortcuts: &[
        Shortcut {
            key: "Esc",
            desc: "Dismiss banner / close popup",
        },
        Shortcut {
            key: "?",
            desc: "Toggle this help",
        },
        Shortcut {
            key: "q",
            desc: "Quit",
        },
    ],
};

/// Render the help popup overlay centered on screen.
pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();

    let popup_w = POPUP_WIDTH.min(area.width.saturating_sub(2));
    let popup_h = POPUP_HEIGHT.min(area.height.saturating_sub(2));

    let popup_area = centered_rect(popup_w, popup_h, area);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Line::from(vec![
            Span::styled(
                " HELP ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("(? to close) ", Style::default().fg(Color::Gray)),
        ]));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let [left_col, right_col] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(inner);

    let left_para = Paragraph::new(build_column_lines(&[&NAVIGATION, &GENERAL]));
    frame.render_widget(left_para, inset(left_col, 1, 1));

    let right_para = Paragraph::new(build_column_lines(&[&ACTIONS, &FORMS]));
    frame.render_widget(right_para, inset(right_col, 1, 1));
}

/// Build the lines for one column of categories.
fn build_column_lines<'a>(categories: &[&Category]) -> Vec<Line<'a>> {
    let mut lines: Vec<Line<'a>> = Vec::new();

    for (cat_idx, cat) in categories.iter().enumerate() {
        if cat_idx > 0 {
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled(
            cat.title,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )));

        let sep: String = "\u{2500}".repeat(32);
        lines.push(Line::from(Span::styled(
            sep,
            Style::default().fg(Color::DarkGray),
        )));

        for sc in cat.shortcuts.iter() {
            let key_display = format!("{:<14}", sc.key);
            lines.push(Line::from(vec![
                Span::styled(key_display, Style::default().fg(Color::Yellow)),
                Span::styled(sc.desc, Style::default().fg(Color::Gray)),
            ]));
        }
    }

    lines
}

/// Return a centered sub-rect of the given size within `area`.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

/// Inset a rect by the given horizontal and vertical margins.
fn inset(area: Rect, h: u16, v: u16) -> Rect {
    Rect::new(
        area.x + h,
        area.y + v,
        area.width.saturating_sub(h * 2),
        area.height.saturating_sub(v * 2),
    )
}
