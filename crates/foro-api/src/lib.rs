pub mod categories;
pub mod error;
pub mod forms;
pub mod messages;
pub mod state;
pub mod topics;

#[cfg(test)]
mod test_support;

use axum::{
    Router,
    routing::{get, post},
};

pub use error::ApiError;
pub use state::{AppState, AppStateInner};

/// All forum routes. Layers (tracing, etc.) are added by the caller.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(categories::home))
        .route(
            "/nueva_categoria",
            get(categories::new_category_form).post(categories::create_category),
        )
        .route("/categoria/{category_id}", get(categories::show_category))
        .route(
            "/categoria/{category_id}/nuevo_tema",
            get(topics::new_topic_form).post(topics::create_topic),
        )
        .route("/tema/{topic_id}", get(topics::show_topic))
        .route("/tema/{topic_id}/nuevo_mensaje", post(messages::create_message))
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
