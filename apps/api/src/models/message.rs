use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One direct message between two users, keyed by e-mail address.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MessageRow {
    pub id: Uuid,
    pub sender_email: String,
    pub receiver_email: String,
    pub message: String,
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
}
