use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::message::MessageRow;

/// Latest message exchanged with one counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    pub email: String,
    pub last_message: String,
    pub timestamp: DateTime<Utc>,
}

/// Collapses `messages` (newest first) into one summary per counterpart,
/// preserving newest-first order.
pub fn summarize_conversations(email: &str, messages: &[MessageRow]) -> Vec<ConversationSummary> {
    let mut seen = HashSet::new();
    messages
        .iter()
        .filter_map(|m| {
            let other = if m.sender_email == email {
                &m.receiver_email
            } else {
                &m.sender_email
            };
            seen.insert(other.clone()).then(|| ConversationSummary {
                email: other.clone(),
                last_message: m.message.clone(),
                timestamp: m.created_at,
            })
        })
        .collect()
}
