use std::sync::Arc;

use assert_matches::assert_matches;
use uuid::Uuid;

use shared_models::clinic::{ContactMessage, DoctorColumns, Service};
use shared_models::notification::NotificationVariant;
use shared_models::screen::{BookAction, Listing, APPOINTMENTS_ANCHOR, LOGIN_PATH};
use shared_utils::test_utils::{doctor, RecordingStore, StoreCall, TestUser};
use site_cell::models::{
    AppointmentSection, ContactFields, ContactOutcome, NO_SERVICES_MESSAGE, NO_SERVICES_TITLE,
    SEND_LABEL,
};
use site_cell::services::{ContactFormController, HomePageController, ServiceCatalogController};

fn service(name: &str) -> Service {
    Service {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: Some(format!("{} for the whole family", name)),
    }
}

fn complete_fields() -> ContactFields {
    ContactFields {
        name: "Jordan Lee".to_string(),
        email: "jordan@example.com".to_string(),
        subject: "Parking".to_string(),
        message: "Is there parking near the clinic?".to_string(),
    }
}

// ==============================================================================
// HOME
// ==============================================================================

#[tokio::test]
async fn anonymous_home_page_prompts_sign_in_without_fetching() {
    let store = RecordingStore::new();
    let page = HomePageController::new(Arc::new(store.clone()), None).render().await;

    assert_eq!(page.hero.cta, BookAction::Login { href: LOGIN_PATH });
    assert_eq!(page.features.len(), 3);
    assert_matches!(page.appointments, AppointmentSection::SignInPrompt { login_href: "/login", register_href: "/register", .. });
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn signed_in_home_page_embeds_initialized_booking_form() {
    let store = RecordingStore::new()
        .with_doctors(vec![doctor("Dr. Ada Moss", "Cardiology")])
        .with_profile("Jordan Lee");
    let user = TestUser::default();

    let page = HomePageController::new(Arc::new(store.clone()), Some(user.to_session()))
        .render()
        .await;

    assert_eq!(page.hero.cta, BookAction::ScrollToAppointments { href: APPOINTMENTS_ANCHOR });
    let AppointmentSection::BookingForm { form } = page.appointments else {
        panic!("expected the booking form");
    };
    assert_eq!(form.patient_name, "Jordan Lee");
    assert_eq!(form.doctors[0].label, "Dr. Ada Moss - Cardiology");
    assert_eq!(
        store.calls(),
        vec![StoreCall::ListDoctors(DoctorColumns::Summary), StoreCall::GetProfile(user.id.clone())]
    );
}

// ==============================================================================
// SERVICES
// ==============================================================================

#[tokio::test]
async fn services_keep_backend_order() {
    let store = RecordingStore::new().with_services(vec![
        service("Cardiology"),
        service("Pediatrics"),
        service("Radiology"),
    ]);
    let mut catalog = ServiceCatalogController::new(Arc::new(store));
    assert_eq!(catalog.services(), &Listing::Loading { placeholders: 6 });

    catalog.load().await;

    let names: Vec<_> = catalog.services().items().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Cardiology", "Pediatrics", "Radiology"]);
}

#[tokio::test]
async fn services_failure_notifies_and_shows_empty_state() {
    let store = RecordingStore::new().failing_services("Failed to fetch");
    let mut catalog = ServiceCatalogController::new(Arc::new(store));

    catalog.load().await;
    let view = catalog.view();

    assert_eq!(
        view.services,
        Listing::Empty { title: NO_SERVICES_TITLE, message: NO_SERVICES_MESSAGE }
    );
    assert_eq!(view.notifications[0].title, "Error loading services");
    assert_eq!(view.notifications[0].variant, NotificationVariant::Destructive);
}

// ==============================================================================
// CONTACT
// ==============================================================================

#[tokio::test]
async fn contact_success_inserts_message_and_clears_fields() {
    let store = RecordingStore::new();
    let mut form = ContactFormController::new(Arc::new(store.clone()));
    form.fill(complete_fields());

    assert_eq!(form.submit().await, ContactOutcome::Sent);
    assert_eq!(
        store.inserted_messages(),
        vec![ContactMessage {
            name: "Jordan Lee".to_string(),
            email: "jordan@example.com".to_string(),
            subject: "Parking".to_string(),
            message: "Is there parking near the clinic?".to_string(),
        }]
    );

    let view = form.view();
    assert!(view.fields.is_empty());
    assert_eq!(view.submit_label, SEND_LABEL);
    assert_eq!(view.notifications[0].title, "Message Sent!");
    assert_eq!(view.notifications[0].variant, NotificationVariant::Default);
}

#[tokio::test]
async fn contact_failure_preserves_fields() {
    let store = RecordingStore::new().failing_inserts("rate limit exceeded");
    let mut form = ContactFormController::new(Arc::new(store));
    form.fill(complete_fields());

    assert_eq!(form.submit().await, ContactOutcome::Failed("rate limit exceeded".to_string()));
    let view = form.view();
    assert_eq!(view.fields, complete_fields());
    assert_eq!(view.notifications[0].title, "Error sending message");
    assert_eq!(view.notifications[0].description.as_deref(), Some("rate limit exceeded"));
}

#[tokio::test]
async fn contact_subject_is_optional_but_message_is_not() {
    let store = RecordingStore::new();
    let mut form = ContactFormController::new(Arc::new(store.clone()));

    form.fill(ContactFields { subject: String::new(), ..complete_fields() });
    assert_eq!(form.submit().await, ContactOutcome::Sent);

    form.fill(ContactFields { message: "   ".to_string(), ..complete_fields() });
    assert_matches!(form.submit().await, ContactOutcome::Invalid(reason) if reason == "Message is required");

    form.fill(ContactFields { email: "jordan.example.com".to_string(), ..complete_fields() });
    assert_matches!(form.submit().await, ContactOutcome::Invalid(_));

    assert_eq!(store.inserted_messages().len(), 1);
}
