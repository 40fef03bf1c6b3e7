use std::sync::Arc;

use axum::{
    Router,
    routing::get,
    middleware,
};

use shared_config::AppConfig;
use shared_utils::extractor::session_middleware;

use crate::handlers;

pub fn site_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(handlers::home_page))
        .route("/services", get(handlers::list_services))
        .route("/contact", get(handlers::contact_page).post(handlers::send_message))
        .layer(middleware::from_fn_with_state(state.clone(), session_middleware))
        .with_state(state)
}
