//! Axum route handlers for direct messages between users.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::extract::AppJson;
use crate::messaging::conversations::{summarize_conversations, ConversationSummary};
use crate::messaging::store::{insert_message, latest_per_counterpart, messages_between};
use crate::models::message::MessageRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SendMessageRequest {
    pub sender_email: Option<String>,
    pub receiver_email: Option<String>,
    pub message: Option<String>,
}

/// A message that passed validation, with normalized addresses.
#[derive(Debug, PartialEq, Eq)]
pub struct ValidMessage {
    pub sender_email: String,
    pub receiver_email: String,
    pub message: String,
}

impl SendMessageRequest {
    pub fn validate(self) -> Result<ValidMessage, AppError> {
        let (Some(sender), Some(receiver), Some(message)) = (
            non_blank(self.sender_email),
            non_blank(self.receiver_email),
            non_blank(self.message),
        ) else {
            return Err(AppError::Validation("All fields are required.".to_string()));
        };

        let sender_email = normalize_email(&sender);
        let receiver_email = normalize_email(&receiver);
        for email in [&sender_email, &receiver_email] {
            if !is_plausible_email(email) {
                return Err(AppError::Validation(format!(
                    "'{email}' is not a valid email address."
                )));
            }
        }

        Ok(ValidMessage {
            sender_email,
            receiver_email,
            message,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}

/// POST /api/chat/send
///
/// Stores the message, then e-mails the receiver (best effort).
pub async fn handle_send_message(
    State(state): State<AppState>,
    AppJson(request): AppJson<SendMessageRequest>,
) -> Result<(StatusCode, Json<MessageRow>), AppError> {
    let valid = request.validate()?;

    let stored = insert_message(
        &state.db,
        &valid.sender_email,
        &valid.receiver_email,
        &valid.message,
    )
    .await?;

    state.notifier.notify_new_message(&stored).await;

    Ok((StatusCode::CREATED, Json(stored)))
}

/// GET /api/chat/all/:email
///
/// One entry per counterpart with the latest message, newest conversation first.
pub async fn handle_list_conversations(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Vec<ConversationSummary>>, AppError> {
    let email = normalize_email(&email);
    let latest = latest_per_counterpart(&state.db, &email).await?;
    Ok(Json(summarize_conversations(&email, &latest)))
}

/// GET /api/chat/:user1/:user2
pub async fn handle_get_thread(
    State(state): State<AppState>,
    Path((user1, user2)): Path<(String, String)>,
) -> Result<Json<Vec<MessageRow>>, AppError> {
    let messages =
        messages_between(&state.db, &normalize_email(&user1), &normalize_email(&user2)).await?;
    Ok(Json(messages))
}
