//! BookDesk CLI - operator console for a WhatsApp booking platform
//!
//! A terminal client for the BookDesk REST API: tenant setup, conversation
//! threads, and bookable-resource management.

mod api;
mod auth;
mod config;
mod models;
mod tui;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use models::{Direction, ResourceCreate, TenantCreate, TenantUpdate};

#[derive(Parser)]
#[command(name = "bookdesk")]
#[command(about = "Terminal operator console for a WhatsApp booking platform", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in against the session provider
    Login {
        /// Account email
        email: String,

        /// Password (prompted if omitted)
        #[arg(short, long)]
        password: Option<String>,

        /// Force a fresh login even if a valid session exists
        #[arg(short, long)]
        force: bool,
    },

    /// Log out and clear the stored session
    Logout,

    /// Show current session status
    Status,

    /// Create your tenant (business profile)
    Setup {
        /// Business name
        #[arg(long)]
        name: String,

        /// WhatsApp phone-number id (from Meta)
        #[arg(long)]
        phone_number_id: String,

        /// WhatsApp access token
        #[arg(long)]
        access_token: String,

        /// Webhook verify token
        #[arg(long)]
        verify_token: Option<String>,

        /// Google Calendar id
        #[arg(long)]
        calendar_id: Option<String>,

        /// Google service-account credential blob (JSON)
        #[arg(long)]
        service_account_json: Option<String>,
    },

    /// Show your tenant
    Tenant,

    /// Update tenant settings (omitted flags are left unchanged)
    Update {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        access_token: Option<String>,

        #[arg(long)]
        verify_token: Option<String>,

        #[arg(long)]
        calendar_id: Option<String>,

        #[arg(long)]
        service_account_json: Option<String>,
    },

    /// List messages, newest first
    Messages {
        /// Maximum number of messages to fetch
        #[arg(short, long, default_value = "100")]
        limit: usize,

        /// Offset into the message list
        #[arg(short, long)]
        offset: Option<usize>,

        /// Filter by direction: inbound or outbound
        #[arg(short, long)]
        direction: Option<Direction>,
    },

    /// List conversation threads grouped by contact
    Conversations {
        /// Maximum number of messages to group
        #[arg(short, long, default_value = "100")]
        limit: usize,
    },

    /// Read one contact's thread, oldest first
    Read {
        /// Contact phone number (from `conversations` output)
        contact: String,

        /// Maximum number of messages to fetch
        #[arg(short, long, default_value = "100")]
        limit: usize,
    },

    /// List bookable resources
    Resources,

    /// Add a bookable resource
    ResourceAdd {
        /// Resource name
        name: String,

        #[arg(short, long)]
        description: Option<String>,

        /// External identifier (e.g. staff id in another system)
        #[arg(short, long)]
        external_id: Option<String>,
    },

    /// Delete a bookable resource
    ResourceRm {
        /// Resource id (from `resources` output)
        id: i64,
    },

    /// Launch the dashboard terminal user interface
    Tui,
}

fn prompt_password() -> Result<String> {
    use std::io::{self, Write};
    print!("Password: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim_end().to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Login {
            email,
            password,
            force,
        } => {
            let password = match password {
                Some(p) => p,
                None => prompt_password()?,
            };
            auth::login(&email, &password, force).await?;
        }
        Commands::Logout => {
            auth::logout().await?;
        }
        Commands::Status => {
            auth::status().await?;
        }
        Commands::Setup {
            name,
            phone_number_id,
            access_token,
            verify_token,
            calendar_id,
            service_account_json,
        } => {
            api::setup_tenant(TenantCreate {
                name,
                whatsapp_phone_number_id: phone_number_id,
                whatsapp_access_token: access_token,
                webhook_verify_token: verify_token,
                google_calendar_id: calendar_id,
                google_service_account_json: service_account_json,
            })
            .await?;
        }
        Commands::Tenant => {
            api::show_tenant().await?;
        }
        Commands::Update {
            name,
            access_token,
            verify_token,
            calendar_id,
            service_account_json,
        } => {
            api::update_tenant(TenantUpdate {
                name,
                whatsapp_access_token: access_token,
                webhook_verify_token: verify_token,
                google_calendar_id: calendar_id,
                google_service_account_json: service_account_json,
            })
            .await?;
        }
        Commands::Messages {
            limit,
            offset,
            direction,
        } => {
            api::list_messages(api::MessagesQuery {
                limit: Some(limit),
                offset,
                direction,
            })
            .await?;
        }
        Commands::Conversations { limit } => {
            api::list_conversations(limit).await?;
        }
        Commands::Read { contact, limit } => {
            api::read_thread(&contact, limit).await?;
        }
        Commands::Resources => {
            api::list_resources().await?;
        }
        Commands::ResourceAdd {
            name,
            description,
            external_id,
        } => {
            api::add_resource(ResourceCreate {
                name,
                description,
                external_id,
            })
            .await?;
        }
        Commands::ResourceRm { id } => {
            api::remove_resource(id).await?;
        }
        Commands::Tui => {
            tui::run().await?;
        }
    }

    Ok(())
}
