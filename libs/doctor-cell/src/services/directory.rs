use std::mem;
use std::sync::Arc;

use tracing::{debug, warn};

use shared_database::ClinicStore;
use shared_models::clinic::DoctorColumns;
use shared_models::notification::Notification;
use shared_models::screen::Listing;

use crate::models::{
    DoctorCard, DoctorDirectoryView, DOCTOR_PLACEHOLDERS, NO_DOCTORS_MESSAGE, NO_DOCTORS_TITLE,
};

/// Public doctor directory. Anyone may browse; the booking button on each
/// card depends on whether the visitor is signed in.
pub struct DoctorDirectoryController {
    store: Arc<dyn ClinicStore>,
    signed_in: bool,
    doctors: Listing<DoctorCard>,
    notifications: Vec<Notification>,
}

impl DoctorDirectoryController {
    pub fn new(store: Arc<dyn ClinicStore>, signed_in: bool) -> Self {
        Self {
            store,
            signed_in,
            doctors: Listing::loading(DOCTOR_PLACEHOLDERS),
            notifications: Vec::new(),
        }
    }

    pub async fn load(&mut self) {
        let doctors = match self.store.list_doctors(DoctorColumns::All).await {
            Ok(doctors) => doctors,
            Err(e) => {
                warn!("Failed to load doctor directory: {}", e);
                self.notifications.push(Notification::error("Error loading doctors", e.message));
                Vec::new()
            }
        };
        debug!("Doctor directory loaded with {} entries", doctors.len());

        let cards: Vec<DoctorCard> = doctors
            .iter()
            .map(|doctor| DoctorCard::from_doctor(doctor, self.signed_in))
            .collect();
        self.doctors = Listing::from_items(cards, NO_DOCTORS_TITLE, NO_DOCTORS_MESSAGE);
    }

    pub fn doctors(&self) -> &Listing<DoctorCard> {
        &self.doctors
    }

    pub fn view(&mut self) -> DoctorDirectoryView {
        DoctorDirectoryView {
            doctors: self.doctors.clone(),
            notifications: mem::take(&mut self.notifications),
        }
    }
}
