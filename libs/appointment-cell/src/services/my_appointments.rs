// libs/appointment-cell/src/services/my_appointments.rs
use std::mem;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{debug, warn};

use shared_database::ClinicStore;
use shared_models::auth::Session;
use shared_models::clinic::AppointmentRecord;
use shared_models::notification::Notification;
use shared_models::screen::{Listing, ScreenOutcome};

use crate::models::{
    AppointmentCard, MyAppointmentsView, StatusTone, APPOINTMENT_PLACEHOLDERS,
    NO_APPOINTMENTS_MESSAGE, NO_APPOINTMENTS_TITLE,
};

pub struct MyAppointmentsController {
    store: Arc<dyn ClinicStore>,
    today: NaiveDate,
    appointments: Listing<AppointmentCard>,
    notifications: Vec<Notification>,
}

impl MyAppointmentsController {
    pub fn new(store: Arc<dyn ClinicStore>, today: NaiveDate) -> Self {
        Self {
            store,
            today,
            appointments: Listing::loading(APPOINTMENT_PLACEHOLDERS),
            notifications: Vec::new(),
        }
    }

    pub fn mount(store: Arc<dyn ClinicStore>) -> Self {
        Self::new(store, Local::now().date_naive())
    }

    /// Anonymous visitors are sent to the login screen before anything is
    /// fetched.
    pub async fn load(&mut self, session: Option<&Session>) -> ScreenOutcome<MyAppointmentsView> {
        let Some(session) = session else {
            debug!("My appointments requested without a session, redirecting to login");
            return ScreenOutcome::to_login();
        };

        let rows = match self.store.list_appointments(session.user_id()).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Failed to load appointments for {}: {}", session.user_id(), e);
                self.notifications.push(Notification::error("Error loading appointments", e.message));
                Vec::new()
            }
        };

        let cards: Vec<AppointmentCard> = rows.iter().map(|row| self.card(row)).collect();
        self.appointments = Listing::from_items(cards, NO_APPOINTMENTS_TITLE, NO_APPOINTMENTS_MESSAGE);

        ScreenOutcome::Render(self.view())
    }

    fn card(&self, row: &AppointmentRecord) -> AppointmentCard {
        AppointmentCard {
            id: row.id.to_string(),
            doctor_name: row.doctors.as_ref().map(|d| d.name.clone()),
            specialty: row.doctors.as_ref().map(|d| d.specialty.clone()),
            date: row.appointment_date,
            date_label: row.appointment_date.format("%B %-d, %Y").to_string(),
            time: row.appointment_time.clone(),
            reason: row.reason_for_visit.clone().filter(|reason| !reason.trim().is_empty()),
            status: row.status.to_string(),
            status_tone: StatusTone::from(&row.status),
            upcoming: row.appointment_date >= self.today,
        }
    }

    pub fn appointments(&self) -> &Listing<AppointmentCard> {
        &self.appointments
    }

    pub fn view(&mut self) -> MyAppointmentsView {
        MyAppointmentsView {
            appointments: self.appointments.clone(),
            notifications: mem::take(&mut self.notifications),
        }
    }
}
