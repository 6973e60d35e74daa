use crate::chatbot::catalog::Catalog;
use crate::chatbot::prompts::{CONTEXT_LINE, ESCALATION_SYSTEM};
use crate::llm_client::{LanguageModel, LlmError};

/// Builds the fallback system instruction: fixed policy text followed by every
/// catalog entry, one per line, in catalog order.
pub fn build_system_prompt(catalog: &Catalog) -> String {
    let context = catalog
        .entries()
        .iter()
        .map(|e| {
            CONTEXT_LINE
                .replace("{pattern}", &e.pattern)
                .replace("{response}", &e.response)
        })
        .collect::<Vec<_>>()
        .join("\n");
    ESCALATION_SYSTEM.replace("{context}", &context)
}

/// Asks the model for a free-form answer grounded in the catalog.
/// The top choice is returned as-is.
pub async fn escalate(
    llm: &dyn LanguageModel,
    catalog: &Catalog,
    normalized: &str,
) -> Result<String, LlmError> {
    let system = build_system_prompt(catalog);
    llm.complete(&system, normalized).await
}
