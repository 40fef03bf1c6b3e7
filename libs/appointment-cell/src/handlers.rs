// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{State, Extension},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_database::{ClinicStore, SupabaseStore};
use shared_models::auth::Session;
use shared_models::error::AppError;
use shared_models::screen::ScreenOutcome;

use crate::models::{BookAppointmentForm, BookingFormView, SubmitOutcome};
use crate::services::{BookingFormController, MyAppointmentsController};

const SIGN_IN_TO_BOOK: &str = "Sign in to book an appointment";

fn store_for(state: &AppConfig, session: Option<&Session>) -> Arc<dyn ClinicStore> {
    Arc::new(SupabaseStore::new(state, session))
}

/// Booking form as first shown: doctor picker and patient details loaded.
#[axum::debug_handler]
pub async fn get_booking_form(
    State(state): State<Arc<AppConfig>>,
    session: Option<Extension<Session>>,
) -> Json<BookingFormView> {
    let session = session.map(|Extension(session)| session);
    let store = store_for(&state, session.as_ref());

    let mut form = BookingFormController::mount(store, session);
    form.initialize().await;

    Json(form.view())
}

/// Submits a booking. Backend failures are reported in the returned form's
/// notifications with the typed values preserved.
#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<AppConfig>>,
    session: Option<Extension<Session>>,
    Json(request): Json<BookAppointmentForm>,
) -> Result<Json<Value>, AppError> {
    let Some(Extension(session)) = session else {
        return Err(AppError::Auth(SIGN_IN_TO_BOOK.to_string()));
    };
    let store = store_for(&state, Some(&session));

    let mut form = BookingFormController::mount(store, Some(session));
    form.fill(request)
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let outcome = form.submit().await;
    match &outcome {
        SubmitOutcome::NotSignedIn => {
            return Err(AppError::Auth(SIGN_IN_TO_BOOK.to_string()));
        }
        SubmitOutcome::Invalid(reason) => {
            return Err(AppError::ValidationError(reason.clone()));
        }
        _ => {}
    }

    // Reload the picker so the returned form can be shown again as-is.
    let mut notifications = form.take_notifications();
    form.initialize().await;
    let mut view = form.view();
    notifications.append(&mut view.notifications);
    view.notifications = notifications;

    Ok(Json(json!({
        "success": outcome == SubmitOutcome::Booked,
        "outcome": outcome,
        "form": view
    })))
}

#[axum::debug_handler]
pub async fn get_my_appointments(
    State(state): State<Arc<AppConfig>>,
    session: Option<Extension<Session>>,
) -> Response {
    let session = session.map(|Extension(session)| session);
    let store = store_for(&state, session.as_ref());

    let mut screen = MyAppointmentsController::mount(store);
    match screen.load(session.as_ref()).await {
        ScreenOutcome::Render(view) => Json(view).into_response(),
        ScreenOutcome::Redirect { location } => Redirect::to(location).into_response(),
    }
}
