//! Message-related models

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether the tenant's WhatsApp number received or sent the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Inbound,
    Outbound,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Inbound => write!(f, "inbound"),
            Direction::Outbound => write!(f, "outbound"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "inbound" | "in" => Ok(Direction::Inbound),
            "outbound" | "out" => Ok(Direction::Outbound),
            other => Err(format!(
                "invalid direction '{}' (expected 'inbound' or 'outbound')",
                other
            )),
        }
    }
}

/// A stored WhatsApp message.
///
/// Created exclusively by the ingestion/delivery backend; this client only
/// reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub tenant_id: i64,
    pub sender_number: String,
    pub recipient_number: String,
    pub text: String,
    pub direction: Direction,
    pub status: String,
    pub whatsapp_message_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Phone number of the other party: the sender for inbound messages, the
    /// recipient for outbound ones. Threads are keyed on this, so the same
    /// rule must be applied everywhere messages are grouped.
    pub fn contact_number(&self) -> &str {
        match self.direction {
            Direction::Inbound => &self.sender_number,
            Direction::Outbound => &self.recipient_number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn message(direction: Direction) -> Message {
        Message {
            id: 1,
            tenant_id: 7,
            sender_number: "+1555".to_string(),
            recipient_number: "+1999".to_string(),
            text: "hi".to_string(),
            direction,
            status: "delivered".to_string(),
            whatsapp_message_id: None,
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_contact_number_follows_direction() {
        assert_eq!(message(Direction::Inbound).contact_number(), "+1555");
        assert_eq!(message(Direction::Outbound).contact_number(), "+1999");
    }

    #[test]
    fn test_direction_wire_format() {
        let json = r#"{"id":1,"tenant_id":7,"sender_number":"+1555","recipient_number":"+1999","text":"hi","direction":"inbound","status":"received","whatsapp_message_id":null,"created_at":"2025-06-01T12:00:00Z"}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.direction, Direction::Inbound);
        assert_eq!(
            serde_json::to_value(Direction::Outbound).unwrap(),
            serde_json::json!("outbound")
        );
    }

    #[test]
    fn test_direction_from_str() {
        assert_eq!("inbound".parse::<Direction>().unwrap(), Direction::Inbound);
        assert_eq!("OUT".parse::<Direction>().unwrap(), Direction::Outbound);
        assert!("sideways".parse::<Direction>().is_err());
    }
}
