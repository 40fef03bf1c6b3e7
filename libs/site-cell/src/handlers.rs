use std::sync::Arc;

use axum::{
    extract::{State, Extension},
    Json,
};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_database::{ClinicStore, SupabaseStore};
use shared_models::auth::Session;
use shared_models::error::AppError;

use crate::models::{ContactFields, ContactOutcome, ContactPage, HomePage, ServicesView, CONTACT_INFO};
use crate::services::{ContactFormController, HomePageController, ServiceCatalogController};

fn store_for(state: &AppConfig, session: Option<&Session>) -> Arc<dyn ClinicStore> {
    Arc::new(SupabaseStore::new(state, session))
}

#[axum::debug_handler]
pub async fn home_page(
    State(state): State<Arc<AppConfig>>,
    session: Option<Extension<Session>>,
) -> Json<HomePage> {
    let session = session.map(|Extension(session)| session);
    let store = store_for(&state, session.as_ref());

    Json(HomePageController::new(store, session).render().await)
}

#[axum::debug_handler]
pub async fn list_services(
    State(state): State<Arc<AppConfig>>,
    session: Option<Extension<Session>>,
) -> Json<ServicesView> {
    let session = session.map(|Extension(session)| session);
    let mut catalog = ServiceCatalogController::new(store_for(&state, session.as_ref()));
    catalog.load().await;

    Json(catalog.view())
}

#[axum::debug_handler]
pub async fn contact_page(
    State(state): State<Arc<AppConfig>>,
) -> Json<ContactPage> {
    let mut form = ContactFormController::new(store_for(&state, None));

    Json(ContactPage {
        info: CONTACT_INFO,
        form: form.view(),
    })
}

#[axum::debug_handler]
pub async fn send_message(
    State(state): State<Arc<AppConfig>>,
    session: Option<Extension<Session>>,
    Json(fields): Json<ContactFields>,
) -> Result<Json<Value>, AppError> {
    let session = session.map(|Extension(session)| session);
    let mut form = ContactFormController::new(store_for(&state, session.as_ref()));
    form.fill(fields);

    let outcome = form.submit().await;
    if let ContactOutcome::Invalid(reason) = &outcome {
        return Err(AppError::ValidationError(reason.clone()));
    }

    Ok(Json(json!({
        "success": outcome == ContactOutcome::Sent,
        "outcome": outcome,
        "form": form.view()
    })))
}
