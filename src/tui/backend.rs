//! Async backend: bridges the sync TUI event loop with async API calls.
//!
//! Uses an mpsc channel pair. The TUI sends `BackendCommand` values, and a
//! background tokio task executes them and sends `BackendResponse` values back.

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::api;
use crate::api::client::PortalClient;
use crate::models::{Message, Resource, ResourceCreate, Tenant, TenantCreate, TenantUpdate};

/// Commands sent from the TUI event loop to the async backend.
pub enum BackendCommand {
    LoadTenant,
    CreateTenant(TenantCreate),
    UpdateTenant(TenantUpdate),
    LoadMessages { limit: usize },
    LoadResources,
    CreateResource(ResourceCreate),
    DeleteResource { id: i64 },
}

/// Responses from the async backend to the TUI.
pub enum BackendResponse {
    /// `None` means the API reported 404: no tenant set up yet.
    Tenant(Result<Option<Tenant>>),
    TenantCreated(Result<Tenant>),
    TenantUpdated(Result<Tenant>),
    Messages(Result<Vec<Message>>),
    Resources(Result<Vec<Resource>>),
    ResourceCreated(Result<Resource>),
    ResourceDeleted { id: i64, result: Result<()> },
    /// Initial client creation failed (auth issue).
    ClientError(String),
}

/// Handle for interacting with the backend from the TUI side.
pub struct Backend {
    cmd_tx: mpsc::UnboundedSender<BackendCommand>,
    resp_rx: mpsc::UnboundedReceiver<BackendResponse>,
}

impl Backend {
    /// Start the backend. Spawns a tokio task that processes commands.
    pub fn start() -> Self {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (resp_tx, resp_rx) = mpsc::unbounded_channel();

        tokio::spawn(backend_loop(cmd_rx, resp_tx));

        Self { cmd_tx, resp_rx }
    }

    /// Send a command to the backend (non-blocking).
    pub fn send(&self, cmd: BackendCommand) {
        if self.cmd_tx.send(cmd).is_err() {
            tracing::error!("Backend channel closed -- command dropped");
        }
    }

    /// Drain one pending response if available (non-blocking).
    pub fn try_recv(&mut self) -> Option<BackendResponse> {
        self.resp_rx.try_recv().ok()
    }
}

/// Background loop that processes commands.
///
/// Creates a PortalClient once and reuses it across all API calls.
/// If client creation fails, sends a ClientError response and exits.
async fn backend_loop(
    mut cmd_rx: mpsc::UnboundedReceiver<BackendCommand>,
    resp_tx: mpsc::UnboundedSender<BackendResponse>,
) {
    // Try to create the client. If this fails, the user needs to login first.
    let client = match PortalClient::new().await {
        Ok(c) => Arc::new(c),
        Err(e) => {
            let _ = resp_tx.send(BackendResponse::ClientError(format!("{:#}", e)));
            return;
        }
    };

    while let Some(cmd) = cmd_rx.recv().await {
        let client = Arc::clone(&client);
        let resp_tx = resp_tx.clone();

        // Spawn each command as a separate task so we don't block the loop.
        tokio::spawn(async move {
            match cmd {
                BackendCommand::LoadTenant => {
                    let result = api::my_tenant_data(&client).await;
                    let _ = resp_tx.send(BackendResponse::Tenant(result));
                }
                BackendCommand::CreateTenant(data) => {
                    let result = api::create_tenant_data(&client, &data).await;
                    let _ = resp_tx.send(BackendResponse::TenantCreated(result));
                }
                BackendCommand::UpdateTenant(update) => {
                    let result = api::update_tenant_data(&client, update).await;
                    let _ = resp_tx.send(BackendResponse::TenantUpdated(result));
                }
                BackendCommand::LoadMessages { limit } => {
                    let query = api::MessagesQuery {
                        limit: Some(limit),
                        ..Default::default()
                    };
                    let result = api::list_messages_data(&client, &query).await;
                    let _ = resp_tx.send(BackendResponse::Messages(result));
                }
                BackendCommand::LoadResources => {
                    let result = api::list_resources_data(&client).await;
                    let _ = resp_tx.send(BackendResponse::Resources(result));
                }
                BackendCommand::CreateResource(data) => {
                    let result = api::create_resource_data(&client, &data).await;
                    let _ = resp_tx.send(BackendResponse::ResourceCreated(result));
                }
                BackendCommand::DeleteResource { id } => {
                    let result = api::delete_resource_data(&client, id).await;
                    let _ = resp_tx.send(BackendResponse::ResourceDeleted { id, result });
                }
            }
        });
    }
}
