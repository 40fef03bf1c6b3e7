use std::sync::Arc;

use axum::Router;

use appointment_cell::router::appointment_routes;
use doctor_cell::router::doctor_routes;
use shared_config::AppConfig;
use site_cell::router::site_routes;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .merge(site_routes(state.clone()))
        .nest("/doctors", doctor_routes(state.clone()))
        .nest("/appointments", appointment_routes(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;

    use shared_utils::test_utils::TestConfig;

    #[tokio::test]
    async fn my_appointments_is_mounted_under_appointments() {
        let app = create_router(TestConfig::default().to_arc());

        let request = Request::builder()
            .uri("/appointments/mine")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let app = create_router(TestConfig::default().to_arc());

        let request = Request::builder()
            .uri("/billing")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
