use std::sync::Arc;

use chrono::NaiveDate;

use appointment_cell::models::{StatusTone, NO_APPOINTMENTS_MESSAGE, NO_APPOINTMENTS_TITLE};
use appointment_cell::services::MyAppointmentsController;
use shared_models::clinic::AppointmentStatus;
use shared_models::screen::{Listing, ScreenOutcome, LOGIN_PATH};
use shared_utils::test_utils::{appointment, RecordingStore, StoreCall, TestUser};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn anonymous_visitor_is_redirected_before_any_fetch() {
    let store = RecordingStore::new();
    let mut screen = MyAppointmentsController::new(Arc::new(store.clone()), today());

    let outcome = screen.load(None).await;

    assert_eq!(outcome, ScreenOutcome::Redirect { location: LOGIN_PATH });
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn listing_starts_as_skeleton() {
    let screen = MyAppointmentsController::new(Arc::new(RecordingStore::new()), today());
    assert_eq!(screen.appointments(), &Listing::Loading { placeholders: 3 });
}

#[tokio::test]
async fn zero_rows_render_empty_state() {
    let store = RecordingStore::new();
    let user = TestUser::default();
    let mut screen = MyAppointmentsController::new(Arc::new(store.clone()), today());

    let ScreenOutcome::Render(view) = screen.load(Some(&user.to_session())).await else {
        panic!("expected the screen to render");
    };

    assert_eq!(
        view.appointments,
        Listing::Empty {
            title: NO_APPOINTMENTS_TITLE,
            message: NO_APPOINTMENTS_MESSAGE,
        }
    );
    assert_eq!(store.calls(), vec![StoreCall::ListAppointments(user.id.clone())]);
}

#[tokio::test]
async fn cards_keep_backend_order_and_flag_upcoming() {
    let store = RecordingStore::new().with_appointments(vec![
        appointment(date(2026, 11, 2), AppointmentStatus::Scheduled, "Dr. Ada Moss"),
        appointment(today(), AppointmentStatus::Other("Rescheduled".to_string()), "Dr. Ben Ito"),
        appointment(date(2026, 3, 9), AppointmentStatus::Completed, "Dr. Cleo Park"),
        appointment(date(2025, 12, 1), AppointmentStatus::Cancelled, "Dr. Dan Ruiz"),
    ]);
    let user = TestUser::default();
    let mut screen = MyAppointmentsController::new(Arc::new(store), today());

    let ScreenOutcome::Render(view) = screen.load(Some(&user.to_session())).await else {
        panic!("expected the screen to render");
    };
    let cards = view.appointments.items();

    let doctors: Vec<_> = cards.iter().map(|c| c.doctor_name.as_deref().unwrap()).collect();
    assert_eq!(doctors, vec!["Dr. Ada Moss", "Dr. Ben Ito", "Dr. Cleo Park", "Dr. Dan Ruiz"]);

    assert_eq!(cards[0].date_label, "November 2, 2026");
    assert!(cards[0].upcoming);
    assert!(cards[1].upcoming);
    assert!(!cards[2].upcoming);

    let tones: Vec<_> = cards.iter().map(|c| c.status_tone).collect();
    assert_eq!(
        tones,
        vec![StatusTone::Info, StatusTone::Neutral, StatusTone::Success, StatusTone::Danger]
    );
    assert_eq!(cards[1].status, "Rescheduled");
}

#[tokio::test]
async fn load_failure_notifies_and_shows_empty_state() {
    let store = RecordingStore::new().failing_appointments("JWT expired");
    let user = TestUser::default();
    let mut screen = MyAppointmentsController::new(Arc::new(store), today());

    let ScreenOutcome::Render(view) = screen.load(Some(&user.to_session())).await else {
        panic!("expected the screen to render");
    };

    assert!(matches!(view.appointments, Listing::Empty { .. }));
    assert_eq!(view.notifications.len(), 1);
    assert_eq!(view.notifications[0].title, "Error loading appointments");
    assert_eq!(view.notifications[0].description.as_deref(), Some("JWT expired"));
}
