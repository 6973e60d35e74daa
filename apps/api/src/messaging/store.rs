use sqlx::PgPool;
use uuid::Uuid;

use crate::models::message::MessageRow;

pub async fn insert_message(
    pool: &PgPool,
    sender_email: &str,
    receiver_email: &str,
    message: &str,
) -> Result<MessageRow, sqlx::Error> {
    sqlx::query_as::<_, MessageRow>(
        r#"
        INSERT INTO chat_messages (id, sender_email, receiver_email, message)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(sender_email)
    .bind(receiver_email)
    .bind(message)
    .fetch_one(pool)
    .await
}

/// The latest message exchanged with each counterpart of `email`, newest first.
pub async fn latest_per_counterpart(
    pool: &PgPool,
    email: &str,
) -> Result<Vec<MessageRow>, sqlx::Error> {
    sqlx::query_as::<_, MessageRow>(
        r#"
        SELECT * FROM (
            SELECT DISTINCT ON (
                CASE WHEN sender_email = $1 THEN receiver_email ELSE sender_email END
            ) *
            FROM chat_messages
            WHERE sender_email = $1 OR receiver_email = $1
            ORDER BY
                CASE WHEN sender_email = $1 THEN receiver_email ELSE sender_email END,
                created_at DESC
        ) latest
        ORDER BY created_at DESC
        "#,
    )
    .bind(email)
    .fetch_all(pool)
    .await
}

/// The conversation between two users in both directions, oldest first.
pub async fn messages_between(
    pool: &PgPool,
    user1: &str,
    user2: &str,
) -> Result<Vec<MessageRow>, sqlx::Error> {
    sqlx::query_as::<_, MessageRow>(
        r#"
        SELECT * FROM chat_messages
        WHERE (sender_email = $1 AND receiver_email = $2)
           OR (sender_email = $2 AND receiver_email = $1)
        ORDER BY created_at ASC
        "#,
    )
    .bind(user1)
    .bind(user2)
    .fetch_all(pool)
    .await
}
