pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

use crate::chatbot::handlers::handle_chat;
use crate::messaging::handlers::{
    handle_get_thread, handle_list_conversations, handle_send_message,
};
use crate::rate_limit::rate_limit;
use crate::state::AppState;
use crate::transcription::handlers::handle_transcribe;

pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.max_upload_bytes;

    // Direct messages are rate limited; the chatbot routes are not.
    let messaging = Router::new()
        .route("/api/chat/send", post(handle_send_message))
        .route("/api/chat/all/:email", get(handle_list_conversations))
        .route("/api/chat/:user1/:user2", get(handle_get_thread))
        .route_layer(middleware::from_fn_with_state(state.clone(), rate_limit));

    Router::new()
        .route("/health", get(health::health_handler))
        // Chatbot
        .route("/api/chat", post(handle_chat))
        .route(
            "/api/transcribe",
            post(handle_transcribe).layer(DefaultBodyLimit::max(max_upload)),
        )
        .merge(messaging)
        .with_state(state)
}
