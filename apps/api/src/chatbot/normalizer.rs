use crate::chatbot::prompts::TRANSLATE_SYSTEM;
use crate::llm_client::{LanguageModel, LlmError};

/// Translates free-form user text into Urdu. One model call, no local fallback.
pub async fn normalize(llm: &dyn LanguageModel, raw: &str) -> Result<String, LlmError> {
    let translated = llm.complete(TRANSLATE_SYSTEM, raw).await?;
    Ok(translated.trim().to_string())
}
