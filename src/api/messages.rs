//! Message listing and conversation views

use anyhow::{Context, Result};
use serde::Serialize;

use super::client::PortalClient;
use crate::models::{group_conversations, Direction, Message};

/// Query parameters for `GET /messages/`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MessagesQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
}

/// List messages, newest-first as returned by the API.
pub async fn list_messages_data(
    client: &PortalClient,
    query: &MessagesQuery,
) -> Result<Vec<Message>> {
    let resp = client.get_query("/messages/", query).await?;
    resp.json()
        .await
        .context("Failed to parse messages response")
}

/// One-line preview of a message for list output.
fn preview(msg: &Message) -> String {
    let tag = match msg.direction {
        Direction::Inbound => "In",
        Direction::Outbound => "Out",
    };
    let text = msg.text.replace('\n', " ");
    let text = if text.chars().count() > 60 {
        let cut: String = text.chars().take(57).collect();
        format!("{}...", cut)
    } else {
        text
    };
    format!("{}: {}", tag, text)
}

/// List messages (prints to stdout).
pub async fn list_messages(query: MessagesQuery) -> Result<()> {
    let client = PortalClient::new().await?;
    let messages = list_messages_data(&client, &query).await?;

    if messages.is_empty() {
        println!("(no messages)");
        return Ok(());
    }

    for msg in &messages {
        println!(
            "[{}] {:<16} {}",
            msg.created_at.format("%Y-%m-%d %H:%M"),
            msg.contact_number(),
            preview(msg)
        );
    }

    Ok(())
}

/// List conversation threads grouped by contact (prints to stdout).
pub async fn list_conversations(limit: usize) -> Result<()> {
    let client = PortalClient::new().await?;
    let query = MessagesQuery {
        limit: Some(limit),
        ..Default::default()
    };
    let messages = list_messages_data(&client, &query).await?;
    let conversations = group_conversations(&messages);

    println!("\nConversations:");
    println!("{:-<60}", "");

    if conversations.is_empty() {
        println!("  (no conversations)");
        return Ok(());
    }

    for conv in &conversations {
        println!("{}", conv.contact_number);
        println!("  Last: {}", conv.latest.created_at.format("%Y-%m-%d %H:%M"));
        println!("  {}", preview(&conv.latest));
        println!("  {} message(s)", conv.messages.len());
        println!();
    }

    Ok(())
}

/// Show one contact's thread, oldest-first (prints to stdout).
pub async fn read_thread(contact: &str, limit: usize) -> Result<()> {
    let client = PortalClient::new().await?;
    let query = MessagesQuery {
        limit: Some(limit),
        ..Default::default()
    };
    let messages = list_messages_data(&client, &query).await?;
    let conversations = group_conversations(&messages);

    let thread = conversations
        .iter()
        .find(|c| c.contact_number == contact);

    match thread {
        Some(conv) => {
            for msg in &conv.messages {
                let arrow = match msg.direction {
                    Direction::Inbound => "<-",
                    Direction::Outbound => "->",
                };
                println!(
                    "[{}] {} {}",
                    msg.created_at.format("%Y-%m-%d %H:%M"),
                    arrow,
                    msg.text
                );
            }
        }
        None => println!("No conversation with {}.", contact),
    }

    Ok(())
}
