use std::sync::Arc;

use axum::{
    Router,
    routing::get,
    middleware,
};

use shared_config::AppConfig;
use shared_utils::extractor::session_middleware;

use crate::handlers;

pub fn doctor_routes(state: Arc<AppConfig>) -> Router {
    // Public directory; the session only changes the booking buttons
    Router::new()
        .route("/", get(handlers::list_doctors))
        .layer(middleware::from_fn_with_state(state.clone(), session_middleware))
        .with_state(state)
}
