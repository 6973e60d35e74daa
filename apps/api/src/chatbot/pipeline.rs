//! Chat pipeline: translate → match → (hit: canned reply | miss: generated reply).
//!
//! Stages run strictly in sequence. Nothing is cached between requests.

use tracing::info;

use crate::chatbot::catalog::Catalog;
use crate::chatbot::escalator::escalate;
use crate::chatbot::matcher::{find_match, MatchPass};
use crate::chatbot::normalizer::normalize;
use crate::llm_client::{LanguageModel, LlmError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplySource {
    Catalog { entry_id: u32, pass: MatchPass },
    Generated,
}

#[derive(Debug, Clone)]
pub struct ChatReply {
    pub reply: String,
    pub source: ReplySource,
}

pub async fn answer(
    llm: &dyn LanguageModel,
    catalog: &Catalog,
    raw: &str,
) -> Result<ChatReply, LlmError> {
    let normalized = normalize(llm, raw).await?;

    if let Some(hit) = find_match(catalog, &normalized) {
        info!(entry_id = hit.entry.id, pass = ?hit.pass, "Chat message matched catalog");
        return Ok(ChatReply {
            reply: hit.entry.response.clone(),
            source: ReplySource::Catalog {
                entry_id: hit.entry.id,
                pass: hit.pass,
            },
        });
    }

    info!("No catalog match, escalating to model");
    let reply = escalate(llm, catalog, &normalized).await?;
    Ok(ChatReply {
        reply,
        source: ReplySource::Generated,
    })
}
