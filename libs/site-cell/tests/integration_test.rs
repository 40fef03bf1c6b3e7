use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared_utils::test_utils::{MockSupabaseResponses, TestConfig};
use site_cell::router::site_routes;

fn app_for(mock_server: &MockServer) -> Router {
    site_routes(TestConfig::with_supabase_url(mock_server.uri()).to_arc())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

fn post_contact(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/contact")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_home_page_for_anonymous_visitor() {
    let mock_server = MockServer::start().await;
    let (status, json) = send(
        app_for(&mock_server),
        Request::builder().uri("/").body(Body::empty()).unwrap(),
    ).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["hero"]["title"], "Your Health, Our Priority");
    assert_eq!(json["hero"]["cta"]["href"], "/login");
    assert_eq!(json["appointments"]["kind"], "sign_in_prompt");
    assert_eq!(json["features"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_services_listing() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/services"))
        .and(query_param("order", "name.asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockSupabaseResponses::service_row("Cardiology", "Heart health"),
            MockSupabaseResponses::service_row("Pediatrics", "Care for children")
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (status, json) = send(
        app_for(&mock_server),
        Request::builder().uri("/services").body(Body::empty()).unwrap(),
    ).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["services"]["state"], "ready");
    assert_eq!(json["services"]["items"][1]["name"], "Pediatrics");
}

#[tokio::test]
async fn test_contact_page_has_info_and_empty_form() {
    let mock_server = MockServer::start().await;
    let (status, json) = send(
        app_for(&mock_server),
        Request::builder().uri("/contact").body(Body::empty()).unwrap(),
    ).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["info"]["email"], "info@healthcareplus.com");
    assert_eq!(json["info"]["office_hours"][0]["days"], "Monday - Friday");
    assert_eq!(json["form"]["fields"]["name"], "");
    assert_eq!(json["form"]["submit_label"], "Send Message");
}

#[tokio::test]
async fn test_send_message() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/messages"))
        .and(body_json(json!({
            "name": "Jordan Lee",
            "email": "jordan@example.com",
            "subject": "",
            "message": "Do you accept walk-ins?"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (status, json) = send(
        app_for(&mock_server),
        post_contact(json!({
            "name": "Jordan Lee",
            "email": "jordan@example.com",
            "message": "Do you accept walk-ins?"
        })),
    ).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["form"]["fields"]["message"], "");
    assert_eq!(json["form"]["notifications"][0]["title"], "Message Sent!");
}

#[tokio::test]
async fn test_send_message_backend_failure() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/messages"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&mock_server)
        .await;

    let (status, json) = send(
        app_for(&mock_server),
        post_contact(json!({
            "name": "Jordan Lee",
            "email": "jordan@example.com",
            "subject": "Hours",
            "message": "Open on holidays?"
        })),
    ).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], false);
    assert_eq!(json["form"]["fields"]["subject"], "Hours");
    assert_eq!(json["form"]["notifications"][0]["title"], "Error sending message");
    assert_eq!(json["form"]["notifications"][0]["description"], "Service Unavailable");
}

#[tokio::test]
async fn test_send_message_missing_required_field() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (status, json) = send(
        app_for(&mock_server),
        post_contact(json!({ "name": "Jordan Lee", "email": "jordan@example.com" })),
    ).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Message is required");
}
