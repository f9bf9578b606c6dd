use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_link_handler, fallback_handler, health_handler, redirect_handler, reject_root_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/", get(reject_root_handler).post(reject_root_handler))
            // `/health` shadows the `/{id}` GET only; creating still works here.
            .route("/health", get(health_handler).post(create_link_handler))
            .route("/{id}", get(redirect_handler).post(create_link_handler))
            .fallback(fallback_handler)
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }
}
