//! Grouping flat message lists into per-contact conversation threads.

use super::message::Message;

/// A per-contact thread derived from the flat message list.
///
/// Never persisted; rebuilt from the in-memory list after every load.
#[derive(Debug, Clone)]
pub struct Conversation {
    /// Phone number of the other party.
    pub contact_number: String,
    /// Most recent message in the thread.
    pub latest: Message,
    /// Full thread in chronological order, oldest first.
    pub messages: Vec<Message>,
}

/// Group messages into one conversation per distinct contact number.
///
/// The API returns messages newest-first, but that ordering is not trusted:
/// the input is re-sorted (stable, newest-first) before bucketing, so the
/// head of each bucket is the genuine latest message even for out-of-order
/// input. Conversations are returned most-recently-active first; ties keep
/// bucket discovery order.
pub fn group_conversations(messages: &[Message]) -> Vec<Conversation> {
    let mut ordered: Vec<&Message> = messages.iter().collect();
    ordered.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    // Bucket by contact, preserving each bucket's newest-first order.
    // Linear scan is fine at UI list sizes and keeps discovery order.
    let mut buckets: Vec<(String, Vec<&Message>)> = Vec::new();
    for msg in ordered {
        let contact = msg.contact_number();
        match buckets.iter_mut().find(|(number, _)| number == contact) {
            Some((_, bucket)) => bucket.push(msg),
            None => buckets.push((contact.to_string(), vec![msg])),
        }
    }

    let mut conversations: Vec<Conversation> = buckets
        .into_iter()
        .map(|(contact_number, bucket)| Conversation {
            contact_number,
            // Buckets are non-empty by construction.
            latest: bucket[0].clone(),
            messages: bucket.into_iter().rev().cloned().collect(),
        })
        .collect();

    conversations.sort_by(|a, b| b.latest.created_at.cmp(&a.latest.created_at));
    conversations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Direction;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(secs: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, secs).unwrap()
    }

    fn inbound(id: i64, from: &str, text: &str, created_at: DateTime<Utc>) -> Message {
        Message {
            id,
            tenant_id: 1,
            sender_number: from.to_string(),
            recipient_number: "+1000".to_string(),
            text: text.to_string(),
            direction: Direction::Inbound,
            status: "received".to_string(),
            whatsapp_message_id: None,
            created_at,
        }
    }

    fn outbound(id: i64, to: &str, text: &str, created_at: DateTime<Utc>) -> Message {
        Message {
            id,
            tenant_id: 1,
            sender_number: "+1000".to_string(),
            recipient_number: to.to_string(),
            text: text.to_string(),
            direction: Direction::Outbound,
            status: "sent".to_string(),
            whatsapp_message_id: None,
            created_at,
        }
    }

    #[test]
    fn test_empty_input_yields_no_conversations() {
        assert!(group_conversations(&[]).is_empty());
    }

    #[test]
    fn test_singleton_thread() {
        let msgs = vec![inbound(1, "+1555", "hi", at(0))];
        let convs = group_conversations(&msgs);
        assert_eq!(convs.len(), 1);
        assert_eq!(convs[0].contact_number, "+1555");
        assert_eq!(convs[0].latest.id, 1);
        assert_eq!(convs[0].messages.len(), 1);
    }

    #[test]
    fn test_reply_joins_existing_thread() {
        // Newest-first input: outbound reply at T2, inbound original at T1.
        let msgs = vec![
            outbound(2, "+1", "bye", at(10)),
            inbound(1, "+1", "hi", at(5)),
        ];
        let convs = group_conversations(&msgs);
        assert_eq!(convs.len(), 1);
        assert_eq!(convs[0].contact_number, "+1");
        assert_eq!(convs[0].latest.id, 2);
        let ids: Vec<i64> = convs[0].messages.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_inbound_and_outbound_share_a_thread() {
        let msgs = vec![
            outbound(2, "+1555", "see you at 3", at(10)),
            inbound(1, "+1555", "can I book?", at(5)),
        ];
        let convs = group_conversations(&msgs);
        assert_eq!(convs.len(), 1);
        assert_eq!(convs[0].contact_number, "+1555");
    }

    #[test]
    fn test_partition_no_message_dropped_or_duplicated() {
        let msgs = vec![
            inbound(5, "+3", "e", at(50)),
            outbound(4, "+1", "d", at(40)),
            inbound(3, "+2", "c", at(30)),
            inbound(2, "+1", "b", at(20)),
            outbound(1, "+2", "a", at(10)),
        ];
        let convs = group_conversations(&msgs);
        assert_eq!(convs.len(), 3);

        let mut seen: Vec<i64> = convs
            .iter()
            .flat_map(|c| c.messages.iter().map(|m| m.id))
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_conversations_sorted_by_latest_activity() {
        let msgs = vec![
            inbound(3, "+2", "newest", at(30)),
            inbound(2, "+1", "older", at(20)),
            inbound(1, "+3", "oldest", at(10)),
        ];
        let convs = group_conversations(&msgs);
        let contacts: Vec<&str> = convs.iter().map(|c| c.contact_number.as_str()).collect();
        assert_eq!(contacts, vec!["+2", "+1", "+3"]);
    }

    #[test]
    fn test_out_of_order_input_still_picks_true_latest() {
        // Violates the newest-first API contract on purpose.
        let msgs = vec![
            inbound(1, "+1", "first", at(5)),
            outbound(2, "+1", "last", at(10)),
        ];
        let convs = group_conversations(&msgs);
        assert_eq!(convs[0].latest.id, 2);
        let ids: Vec<i64> = convs[0].messages.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_thread_is_oldest_first() {
        let msgs = vec![
            inbound(3, "+1", "c", at(30)),
            outbound(2, "+1", "b", at(20)),
            inbound(1, "+1", "a", at(10)),
        ];
        let convs = group_conversations(&msgs);
        let ids: Vec<i64> = convs[0].messages.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
