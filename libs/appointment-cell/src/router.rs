// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware,
};

use shared_config::AppConfig;
use shared_utils::extractor::session_middleware;

use crate::handlers;

pub fn appointment_routes(state: Arc<AppConfig>) -> Router {
    // Every screen here works out for itself what an anonymous visitor gets
    Router::new()
        .route("/", post(handlers::book_appointment))
        .route("/form", get(handlers::get_booking_form))
        .route("/mine", get(handlers::get_my_appointments))
        .layer(middleware::from_fn_with_state(state.clone(), session_middleware))
        .with_state(state)
}
