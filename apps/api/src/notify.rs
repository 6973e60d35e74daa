//! Best-effort e-mail notifications through the SendGrid v3 API.
//!
//! Notification failures are logged and never fail the request that triggered them.

use std::time::Duration;

use chrono::{Datelike, Utc};
use reqwest::Client;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::models::message::MessageRow;

const SENDGRID_URL: &str = "https://api.sendgrid.com/v3/mail/send";

#[derive(Clone)]
pub struct EmailNotifier {
    client: Client,
    api_key: Option<String>,
    sender: Option<String>,
}

impl EmailNotifier {
    pub fn new(
        api_key: Option<String>,
        sender: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            sender,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some() && self.sender.is_some()
    }

    /// Tells the receiver of `message` that something arrived.
    pub async fn notify_new_message(&self, message: &MessageRow) {
        let (Some(api_key), Some(sender)) = (&self.api_key, &self.sender) else {
            debug!("E-mail notifications disabled; skipping");
            return;
        };

        let html = render_new_message(&message.sender_email, &message.message, Utc::now().year());
        let body = json!({
            "personalizations": [{ "to": [{ "email": message.receiver_email }] }],
            "from": { "email": sender },
            "subject": format!("New Message from {}", message.sender_email),
            "content": [{ "type": "text/html", "value": html }],
        });

        let result = self
            .client
            .post(SENDGRID_URL)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                info!("Email sent to {}", message.receiver_email);
            }
            Ok(response) => {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                warn!("SendGrid returned {status} for {}: {text}", message.receiver_email);
            }
            Err(e) => warn!("Error sending email to {}: {e}", message.receiver_email),
        }
    }
}

pub fn render_new_message(sender: &str, message: &str, year: i32) -> String {
    let sender = escape_html(sender);
    let message = escape_html(message);
    format!(
        r#"<div style="font-family: 'Segoe UI', sans-serif; background-color: #f5f7fa; padding: 40px 0;">
  <div style="max-width: 600px; background-color: #ffffff; margin: 0 auto; border-radius: 12px; overflow: hidden;">
    <div style="background-color: #0a66c2; padding: 25px 20px; text-align: center;">
      <h1 style="color: #ffffff; font-size: 24px; margin: 0;">Labour Hub</h1>
    </div>
    <div style="padding: 30px 25px; color: #333333;">
      <h2 style="color: #0a66c2; font-size: 20px;">New Message Received</h2>
      <p style="font-size: 16px; line-height: 1.6;">You have received a new message from <strong>{sender}</strong>:</p>
      <div style="background-color: #f0f2f5; padding: 15px; border-radius: 8px; margin: 15px 0; font-size: 16px; color: #111;">{message}</div>
      <p style="font-size: 14px; color: #555;">Reply quickly to stay in touch with your contact.</p>
      <div style="text-align: center; margin-top: 20px;">
        <a href="https://labourhub.pk/chat" style="background-color: #0a66c2; color: white; text-decoration: none; padding: 12px 25px; border-radius: 8px; font-weight: bold;">Open Chat</a>
      </div>
    </div>
    <div style="background-color: #f0f2f5; text-align: center; padding: 20px; border-top: 1px solid #e1e4e8;">
      <p style="color: #777777; font-size: 13px; margin: 0;">&copy; {year} Labour Hub. All rights reserved.<br>Karachi, Pakistan</p>
    </div>
  </div>
</div>"#
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
