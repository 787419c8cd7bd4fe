use crate::{handlers, state::AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/chat", post(handlers::chat_handler))
        .route(
            "/articles",
            get(handlers::list_articles_handler).post(handlers::create_article_handler),
        )
        .route("/articles/{number}", get(handlers::get_article_handler))
        .route("/corpus/import", post(handlers::import_corpus_handler))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
