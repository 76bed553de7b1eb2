//! Top-level layout: header, view-specific body, status bar, overlays.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::app::{App, Overlay, Pane, View};
use super::help::{centered_rect, render_help_popup};
use super::{form, resources, sidebar, thread};

/// Sidebar / resources pane widths on the dashboard.
const SIDEBAR_WIDTH: u16 = 34;
const RESOURCES_WIDTH: u16 = 30;

pub fn render(frame: &mut Frame, app: &App) {
    let [header_area, main_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_header(frame, header_area, app);

    match app.view {
        View::Loading => render_loading(frame, main_area),
        View::Setup => render_setup(frame, main_area, app),
        View::Dashboard => render_dashboard(frame, main_area, app),
    }

    render_status(frame, status_area, app);

    match app.overlay {
        Overlay::None => {}
        Overlay::Settings => {
            let height = form::form_height(&app.settings_form);
            let area = centered_rect(64, height, frame.area());
            form::render(
                area,
                frame,
                &app.settings_form,
                " Enter: save   blank fields keep current values   Esc: cancel",
            );
        }
        Overlay::AddResource => {
            let height = form::form_height(&app.resource_form);
            let area = centered_rect(56, height, frame.area());
            form::render(
                area,
                frame,
                &app.resource_form,
                " Enter: add   Esc: cancel",
            );
        }
        Overlay::Help => render_help_popup(frame),
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        " BookDesk ",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];

    if let Some(tenant) = &app.tenant {
        spans.push(Span::styled("| ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            tenant.name.clone(),
            Style::default().fg(Color::White),
        ));
    }

    if matches!(app.view, View::Dashboard) {
        spans.push(Span::styled(
            format!("  [{}]", app.active_pane.as_str()),
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_loading(frame: &mut Frame, area: Rect) {
    let popup = centered_rect(30, 1, area);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Loading...",
            Style::default().fg(Color::DarkGray),
        ))),
        popup,
    );
}

fn render_setup(frame: &mut Frame, area: Rect, app: &App) {
    let height = form::form_height(&app.setup_form);
    let form_area = centered_rect(64, height, area);

    // A short explanation above the form.
    if form_area.y >= area.y + 2 {
        let intro = Rect::new(form_area.x, form_area.y - 2, form_area.width, 1);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "No business is set up yet. Fill this in to get started.",
                Style::default().fg(Color::Gray),
            ))),
            intro,
        );
    }

    form::render(
        form_area,
        frame,
        &app.setup_form,
        " Enter: create   Tab: next field   Esc: quit",
    );
}

fn render_dashboard(frame: &mut Frame, area: Rect, app: &App) {
    let [sidebar_area, thread_area, resources_area] = Layout::horizontal([
        Constraint::Length(SIDEBAR_WIDTH),
        Constraint::Fill(1),
        Constraint::Length(RESOURCES_WIDTH),
    ])
    .areas(area);

    let buf = frame.buffer_mut();

    sidebar::render(
        sidebar_area,
        buf,
        &app.conversations,
        app.selected_conversation,
        app.loading,
        app.active_pane == Pane::Conversations,
    );
    thread::render(
        thread_area,
        buf,
        app.selected_conversation(),
        app.thread_scroll,
        app.active_pane == Pane::Thread,
    );
    resources::render(
        resources_area,
        buf,
        &app.resources,
        app.selected_resource,
        app.loading,
        app.active_pane == Pane::Resources,
    );
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let line = match &app.status_message {
        Some(msg) if app.status_is_error => Line::from(Span::styled(
            format!(" {} (Esc to dismiss)", msg),
            Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )),
        Some(msg) => Line::from(Span::styled(
            format!(" {}", msg),
            Style::default().fg(Color::Green),
        )),
        None => Line::from(Span::styled(
            match app.view {
                View::Loading => " q: quit   r: retry".to_string(),
                View::Setup => " Enter: create   Tab/Shift+Tab: move   Esc: quit".to_string(),
                View::Dashboard => {
                    " q: quit   ?: help   Tab: switch pane   r: reload   s: settings".to_string()
                }
            },
            Style::default().fg(Color::DarkGray),
        )),
    };

    frame.render_widget(Paragraph::new(line), area);
}
