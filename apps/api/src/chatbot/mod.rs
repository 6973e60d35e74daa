// Support chatbot: translate to Urdu, answer from the catalog, fall back to the model.
// All model calls go through llm_client.

pub mod catalog;
pub mod escalator;
pub mod handlers;
pub mod matcher;
pub mod normalizer;
pub mod pipeline;
pub mod prompts;
