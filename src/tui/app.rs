//! TUI application state and main event loop

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use std::time::Duration;

use super::backend::{Backend, BackendCommand, BackendResponse};
use super::form::{Field, FormState};
use super::ui;
use crate::models::{
    group_conversations, Conversation, Message, Resource, ResourceCreate, Tenant, TenantCreate,
    TenantUpdate,
};

/// Target frame rate for UI updates (~30 fps)
const FRAME_DURATION_MS: u64 = 33;

/// How many messages the dashboard fetches per load.
const MESSAGE_FETCH_LIMIT: usize = 100;

/// Top-level view: mirrors the tenant lifecycle.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Waiting for the initial `GET /tenants/me`.
    Loading,
    /// No tenant yet: show the creation form.
    Setup,
    /// Tenant loaded: conversations, thread, resources.
    Dashboard,
}

/// Active pane on the dashboard.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    #[default]
    Conversations,
    Thread,
    Resources,
}

impl Pane {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pane::Conversations => "conversations",
            Pane::Thread => "thread",
            Pane::Resources => "resources",
        }
    }

    fn next(self) -> Self {
        match self {
            Pane::Conversations => Pane::Thread,
            Pane::Thread => Pane::Resources,
            Pane::Resources => Pane::Conversations,
        }
    }

    fn prev(self) -> Self {
        match self {
            Pane::Conversations => Pane::Resources,
            Pane::Thread => Pane::Conversations,
            Pane::Resources => Pane::Thread,
        }
    }
}

/// Modal overlay on top of the current view.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Settings,
    AddResource,
    Help,
}

/// Application state
pub struct App {
    pub should_exit: bool,
    pub view: View,
    pub active_pane: Pane,
    pub overlay: Overlay,

    pub tenant: Option<Tenant>,
    pub messages: Vec<Message>,
    /// Derived from `messages` on every load; never stored independently.
    pub conversations: Vec<Conversation>,
    pub selected_conversation: usize,
    /// Thread scroll in lines above the newest message (0 = follow newest).
    pub thread_scroll: usize,
    pub resources: Vec<Resource>,
    pub selected_resource: usize,

    /// One-line status banner; errors and confirmations both land here.
    pub status_message: Option<String>,
    pub status_is_error: bool,
    /// Whether data is still loading.
    pub loading: bool,
    /// A mutation is in flight; suppresses duplicate submits.
    busy: bool,

    pub setup_form: FormState,
    pub settings_form: FormState,
    pub resource_form: FormState,
}

fn setup_form() -> FormState {
    FormState::new(
        "Set up your business",
        vec![
            Field::new("Business name").required(),
            Field::new("WhatsApp phone id").required(),
            Field::new("WhatsApp token").required().secret(),
            Field::new("Verify token"),
            Field::new("Calendar id"),
            Field::new("Service account"),
        ],
    )
}

fn settings_form() -> FormState {
    FormState::new(
        "Settings",
        vec![
            Field::new("Business name"),
            Field::new("WhatsApp token").secret(),
            Field::new("Verify token"),
            Field::new("Calendar id"),
            Field::new("Service account"),
        ],
    )
}

fn resource_form() -> FormState {
    FormState::new(
        "Add resource",
        vec![
            Field::new("Name").required(),
            Field::new("Description"),
            Field::new("External id"),
        ],
    )
}

impl Default for App {
    fn default() -> Self {
        Self {
            should_exit: false,
            view: View::Loading,
            active_pane: Pane::default(),
            overlay: Overlay::None,
            tenant: None,
            messages: Vec::new(),
            conversations: Vec::new(),
            selected_conversation: 0,
            thread_scroll: 0,
            resources: Vec::new(),
            selected_resource: 0,
            status_message: None,
            status_is_error: false,
            loading: true,
            busy: false,
            setup_form: setup_form(),
            settings_form: settings_form(),
            resource_form: resource_form(),
        }
    }
}

impl App {
    /// Currently selected conversation, if any.
    pub fn selected_conversation(&self) -> Option<&Conversation> {
        self.conversations.get(self.selected_conversation)
    }

    fn set_error(&mut self, msg: String) {
        tracing::warn!("{}", msg);
        self.status_message = Some(msg);
        self.status_is_error = true;
    }

    fn set_status(&mut self, msg: &str) {
        self.status_message = Some(msg.to_string());
        self.status_is_error = false;
    }

    fn dismiss_status(&mut self) {
        self.status_message = None;
        self.status_is_error = false;
    }

    /// Replace the message list and re-derive conversations.
    fn set_messages(&mut self, messages: Vec<Message>) {
        self.conversations = group_conversations(&messages);
        self.messages = messages;
        if self.selected_conversation >= self.conversations.len() {
            self.selected_conversation = self.conversations.len().saturating_sub(1);
        }
        self.thread_scroll = 0;
    }

    fn set_tenant(&mut self, tenant: Tenant) {
        // Prefill the settings form with the current name; credential fields
        // stay blank so an untouched form never overwrites stored secrets.
        self.settings_form = settings_form();
        if let Some(field) = self.settings_form.fields.first_mut() {
            *field = Field::new("Business name").with_value(&tenant.name);
        }
        self.tenant = Some(tenant);
        self.view = View::Dashboard;
    }

    fn reload(&mut self, backend: &Backend) {
        self.loading = true;
        backend.send(BackendCommand::LoadMessages {
            limit: MESSAGE_FETCH_LIMIT,
        });
        backend.send(BackendCommand::LoadResources);
    }

    // -- Backend responses ---------------------------------------------------

    pub fn handle_response(&mut self, resp: BackendResponse, backend: &Backend) {
        match resp {
            BackendResponse::ClientError(msg) => {
                self.loading = false;
                self.set_error(msg);
            }
            BackendResponse::Tenant(Ok(Some(tenant))) => {
                self.set_tenant(tenant);
                self.reload(backend);
            }
            BackendResponse::Tenant(Ok(None)) => {
                self.loading = false;
                self.view = View::Setup;
            }
            BackendResponse::Tenant(Err(e)) => {
                self.loading = false;
                self.set_error(format!("Failed to load tenant: {:#}", e));
            }
            BackendResponse::TenantCreated(Ok(tenant)) => {
                self.busy = false;
                self.set_tenant(tenant);
                self.set_status("Tenant created");
                self.reload(backend);
            }
            BackendResponse::TenantCreated(Err(e)) => {
                self.busy = false;
                self.set_error(format!("Failed to create tenant: {:#}", e));
            }
            BackendResponse::TenantUpdated(Ok(tenant)) => {
                self.busy = false;
                self.set_tenant(tenant);
                self.overlay = Overlay::None;
                self.set_status("Settings saved");
            }
            BackendResponse::TenantUpdated(Err(e)) => {
                self.busy = false;
                self.set_error(format!("Failed to update settings: {:#}", e));
            }
            BackendResponse::Messages(Ok(messages)) => {
                self.loading = false;
                self.set_messages(messages);
            }
            BackendResponse::Messages(Err(e)) => {
                self.loading = false;
                self.set_error(format!("Failed to load messages: {:#}", e));
            }
            BackendResponse::Resources(Ok(resources)) => {
                self.resources = resources;
                if self.selected_resource >= self.resources.len() {
                    self.selected_resource = self.resources.len().saturating_sub(1);
                }
            }
            BackendResponse::Resources(Err(e)) => {
                self.set_error(format!("Failed to load resources: {:#}", e));
            }
            BackendResponse::ResourceCreated(Ok(resource)) => {
                self.busy = false;
                self.set_status(&format!("Resource {} added", resource.name));
                self.resources.push(resource);
                self.overlay = Overlay::None;
                self.resource_form.reset();
            }
            BackendResponse::ResourceCreated(Err(e)) => {
                self.busy = false;
                self.set_error(format!("Failed to add resource: {:#}", e));
            }
            BackendResponse::ResourceDeleted { id, result: Ok(()) } => {
                self.resources.retain(|r| r.id != id);
                if self.selected_resource >= self.resources.len() {
                    self.selected_resource = self.resources.len().saturating_sub(1);
                }
                self.set_status("Resource deleted");
            }
            BackendResponse::ResourceDeleted { result: Err(e), .. } => {
                self.set_error(format!("Failed to delete resource: {:#}", e));
            }
        }
    }

    // -- Input events --------------------------------------------------------

    /// Poll and handle one input event.
    pub fn handle_events(&mut self, backend: &Backend) -> Result<()> {
        if event::poll(Duration::from_millis(FRAME_DURATION_MS))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    self.handle_key(key, backend);
                }
                Event::Resize(_, _) => {
                    // Terminal resized - will be handled on next draw
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent, backend: &Backend) {
        match self.overlay {
            Overlay::Help => {
                self.overlay = Overlay::None;
            }
            Overlay::Settings => self.handle_settings_key(key, backend),
            Overlay::AddResource => self.handle_add_resource_key(key, backend),
            Overlay::None => match self.view {
                View::Loading => self.handle_loading_key(key, backend),
                View::Setup => self.handle_setup_key(key, backend),
                View::Dashboard => self.handle_dashboard_key(key, backend),
            },
        }
    }

    fn handle_loading_key(&mut self, key: KeyEvent, backend: &Backend) {
        match key.code {
            KeyCode::Char('q') => self.should_exit = true,
            KeyCode::Char('r') => {
                self.dismiss_status();
                self.loading = true;
                backend.send(BackendCommand::LoadTenant);
            }
            KeyCode::Esc => self.dismiss_status(),
            _ => {}
        }
    }

    fn handle_setup_key(&mut self, key: KeyEvent, backend: &Backend) {
        match key.code {
            KeyCode::Esc => {
                if self.status_message.is_some() {
                    self.dismiss_status();
                } else {
                    self.should_exit = true;
                }
            }
            KeyCode::Enter => self.submit_setup(backend),
            _ => {
                form_edit_key(&mut self.setup_form, key);
            }
        }
    }

    fn submit_setup(&mut self, backend: &Backend) {
        if self.busy {
            return;
        }
        if let Some(label) = self.setup_form.missing_required() {
            self.set_error(format!("{} is required", label));
            return;
        }

        let form = &self.setup_form;
        let data = TenantCreate {
            name: form.value(0).to_string(),
            whatsapp_phone_number_id: form.value(1).to_string(),
            whatsapp_access_token: form.value(2).to_string(),
            webhook_verify_token: form.optional_value(3),
            google_calendar_id: form.optional_value(4),
            google_service_account_json: form.optional_value(5),
        };

        self.busy = true;
        self.set_status("Creating tenant...");
        backend.send(BackendCommand::CreateTenant(data));
    }

    fn handle_settings_key(&mut self, key: KeyEvent, backend: &Backend) {
        match key.code {
            KeyCode::Esc => self.overlay = Overlay::None,
            KeyCode::Enter => self.submit_settings(backend),
            _ => {
                form_edit_key(&mut self.settings_form, key);
            }
        }
    }

    fn submit_settings(&mut self, backend: &Backend) {
        if self.busy {
            return;
        }

        let form = &self.settings_form;
        // Blank fields are dropped so existing values and secrets survive.
        let update = TenantUpdate {
            name: form.optional_value(0),
            whatsapp_access_token: form.optional_value(1),
            webhook_verify_token: form.optional_value(2),
            google_calendar_id: form.optional_value(3),
            google_service_account_json: form.optional_value(4),
        }
        .cleaned();

        if update.is_empty() {
            self.overlay = Overlay::None;
            return;
        }

        self.busy = true;
        self.set_status("Saving settings...");
        backend.send(BackendCommand::UpdateTenant(update));
    }

    fn handle_add_resource_key(&mut self, key: KeyEvent, backend: &Backend) {
        match key.code {
            KeyCode::Esc => {
                self.overlay = Overlay::None;
                self.resource_form.reset();
            }
            KeyCode::Enter => self.submit_resource(backend),
            _ => {
                form_edit_key(&mut self.resource_form, key);
            }
        }
    }

    fn submit_resource(&mut self, backend: &Backend) {
        if self.busy {
            return;
        }
        if let Some(label) = self.resource_form.missing_required() {
            self.set_error(format!("{} is required", label));
            return;
        }

        let form = &self.resource_form;
        let data = ResourceCreate {
            name: form.value(0).to_string(),
            description: form.optional_value(1),
            external_id: form.optional_value(2),
        };

        self.busy = true;
        self.set_status("Adding resource...");
        backend.send(BackendCommand::CreateResource(data));
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent, backend: &Backend) {
        match key.code {
            KeyCode::Char('q') => self.should_exit = true,
            KeyCode::Char('?') => self.overlay = Overlay::Help,
            KeyCode::Tab => self.active_pane = self.active_pane.next(),
            KeyCode::BackTab => self.active_pane = self.active_pane.prev(),
            KeyCode::Char('s') => {
                self.overlay = Overlay::Settings;
            }
            KeyCode::Char('r') => {
                self.dismiss_status();
                self.reload(backend);
            }
            KeyCode::Esc => self.dismiss_status(),
            _ => match self.active_pane {
                Pane::Conversations => self.handle_conversations_key(key),
                Pane::Thread => self.handle_thread_key(key),
                Pane::Resources => self.handle_resources_key(key, backend),
            },
        }
    }

    fn handle_conversations_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => {
                if self.selected_conversation > 0 {
                    self.selected_conversation -= 1;
                    self.thread_scroll = 0;
                }
            }
            KeyCode::Down => {
                if self.selected_conversation + 1 < self.conversations.len() {
                    self.selected_conversation += 1;
                    self.thread_scroll = 0;
                }
            }
            KeyCode::Enter | KeyCode::Right => {
                self.active_pane = Pane::Thread;
            }
            _ => {}
        }
    }

    fn handle_thread_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.thread_scroll = self.thread_scroll.saturating_add(1),
            KeyCode::Down => self.thread_scroll = self.thread_scroll.saturating_sub(1),
            KeyCode::Char('G') => self.thread_scroll = 0,
            KeyCode::Left => self.active_pane = Pane::Conversations,
            _ => {}
        }
    }

    fn handle_resources_key(&mut self, key: KeyEvent, backend: &Backend) {
        match key.code {
            KeyCode::Up => {
                if self.selected_resource > 0 {
                    self.selected_resource -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected_resource + 1 < self.resources.len() {
                    self.selected_resource += 1;
                }
            }
            KeyCode::Char('a') => {
                self.resource_form.reset();
                self.overlay = Overlay::AddResource;
            }
            KeyCode::Char('d') => {
                if let Some(res) = self.resources.get(self.selected_resource) {
                    backend.send(BackendCommand::DeleteResource { id: res.id });
                }
            }
            _ => {}
        }
    }

    /// Render the UI
    pub fn render(&self, frame: &mut ratatui::Frame) {
        ui::render(frame, self);
    }
}

/// Shared single-line editing for all forms. Returns true if consumed.
fn form_edit_key(form: &mut FormState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.prev_field(),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(field) = form.focused_field_mut() {
                field.clear();
            }
        }
        KeyCode::Char(c) => {
            if let Some(field) = form.focused_field_mut() {
                field.insert_char(c);
            }
        }
        KeyCode::Backspace => {
            if let Some(field) = form.focused_field_mut() {
                field.backspace();
            }
        }
        KeyCode::Delete => {
            if let Some(field) = form.focused_field_mut() {
                field.delete();
            }
        }
        KeyCode::Left => {
            if let Some(field) = form.focused_field_mut() {
                field.move_left();
            }
        }
        KeyCode::Right => {
            if let Some(field) = form.focused_field_mut() {
                field.move_right();
            }
        }
        KeyCode::Home => {
            if let Some(field) = form.focused_field_mut() {
                field.move_home();
            }
        }
        KeyCode::End => {
            if let Some(field) = form.focused_field_mut() {
                field.move_end();
            }
        }
        _ => return false,
    }
    true
}

/// Run the TUI application.
pub async fn run() -> Result<()> {
    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal).await;
    ratatui::restore();
    result
}

async fn run_app(terminal: &mut DefaultTerminal) -> Result<()> {
    let mut backend = Backend::start();
    let mut app = App::default();

    backend.send(BackendCommand::LoadTenant);

    while !app.should_exit {
        terminal.draw(|frame| app.render(frame))?;

        while let Some(resp) = backend.try_recv() {
            app.handle_response(resp, &backend);
        }

        app.handle_events(&backend)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Direction;
    use chrono::{TimeZone, Utc};

    fn msg(id: i64, contact: &str, direction: Direction, secs: u32) -> Message {
        let (sender, recipient) = match direction {
            Direction::Inbound => (contact.to_string(), "+1000".to_string()),
            Direction::Outbound => ("+1000".to_string(), contact.to_string()),
        };
        Message {
            id,
            tenant_id: 1,
            sender_number: sender,
            recipient_number: recipient,
            text: "hi".to_string(),
            direction,
            status: "delivered".to_string(),
            whatsapp_message_id: None,
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, secs).unwrap(),
        }
    }

    #[test]
    fn test_pane_cycle_round_trips() {
        let mut pane = Pane::Conversations;
        for _ in 0..3 {
            pane = pane.next();
        }
        assert_eq!(pane, Pane::Conversations);
        assert_eq!(Pane::Conversations.prev(), Pane::Resources);
    }

    #[test]
    fn test_set_messages_derives_conversations() {
        let mut app = App::default();
        app.set_messages(vec![
            msg(2, "+2", Direction::Outbound, 20),
            msg(1, "+1", Direction::Inbound, 10),
        ]);
        assert_eq!(app.conversations.len(), 2);
        assert_eq!(app.conversations[0].contact_number, "+2");
    }

    #[test]
    fn test_set_messages_clamps_selection() {
        let mut app = App::default();
        app.set_messages(vec![
            msg(1, "+1", Direction::Inbound, 10),
            msg(2, "+2", Direction::Inbound, 20),
        ]);
        app.selected_conversation = 1;
        app.set_messages(vec![msg(1, "+1", Direction::Inbound, 10)]);
        assert_eq!(app.selected_conversation, 0);
        assert!(app.selected_conversation().is_some());
    }

    #[test]
    fn test_set_messages_empty() {
        let mut app = App::default();
        app.set_messages(Vec::new());
        assert!(app.conversations.is_empty());
        assert!(app.selected_conversation().is_none());
    }

    #[test]
    fn test_error_banner_set_and_dismiss() {
        let mut app = App::default();
        app.set_error("boom".to_string());
        assert!(app.status_is_error);
        app.dismiss_status();
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_set_tenant_prefills_settings_name() {
        let mut app = App::default();
        app.set_tenant(Tenant {
            id: 1,
            user_id: "u".to_string(),
            name: "Acme Clinic".to_string(),
            whatsapp_phone_number_id: "123".to_string(),
            whatsapp_access_token: "tok".to_string(),
            webhook_verify_token: None,
            google_calendar_id: None,
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
        });
        assert!(matches!(app.view, View::Dashboard));
        assert_eq!(app.settings_form.value(0), "Acme Clinic");
        // Credential fields stay blank.
        assert_eq!(app.settings_form.value(1), "");
    }

    #[test]
    fn test_form_edit_key_types_into_focused_field() {
        let mut form = setup_form();
        assert!(form_edit_key(
            &mut form,
            KeyEvent::new(KeyCode::Char('A'), KeyModifiers::NONE)
        ));
        assert_eq!(form.value(0), "A");
        form_edit_key(&mut form, KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        form_edit_key(
            &mut form,
            KeyEvent::new(KeyCode::Char('7'), KeyModifiers::NONE),
        );
        assert_eq!(form.value(1), "7");
    }
}
