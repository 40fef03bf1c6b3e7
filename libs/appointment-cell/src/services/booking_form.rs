// libs/appointment-cell/src/services/booking_form.rs
use std::mem;
use std::sync::Arc;

use chrono::{Local, NaiveDate, NaiveTime};
use tracing::{debug, info, warn};

use shared_database::ClinicStore;
use shared_models::auth::Session;
use shared_models::clinic::{Doctor, DoctorColumns, NewAppointment, Profile};
use shared_models::notification::Notification;

use crate::models::{
    BookAppointmentForm, BookingFields, BookingFormView, DoctorOption, FormError, SubmitOutcome,
    SuccessDialog, SUBMITTING_LABEL, SUBMIT_LABEL, SUCCESS_MESSAGE, SUCCESS_TITLE,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Coordinates the appointment booking form: loads the doctor picker and
/// the patient's profile, holds what the user typed, and sends one insert
/// per submission.
pub struct BookingFormController {
    store: Arc<dyn ClinicStore>,
    session: Option<Session>,
    doctors: Vec<Doctor>,
    profile: Option<Profile>,
    fields: BookingFields,
    min_date: NaiveDate,
    submitting: bool,
    show_success: bool,
    notifications: Vec<Notification>,
}

impl BookingFormController {
    /// `today` becomes the earliest selectable date for this form's lifetime.
    pub fn new(store: Arc<dyn ClinicStore>, session: Option<Session>, today: NaiveDate) -> Self {
        Self {
            store,
            session,
            doctors: Vec::new(),
            profile: None,
            fields: BookingFields::default(),
            min_date: today,
            submitting: false,
            show_success: false,
            notifications: Vec::new(),
        }
    }

    /// Creates the form with today's date in the local time zone.
    pub fn mount(store: Arc<dyn ClinicStore>, session: Option<Session>) -> Self {
        Self::new(store, session, Local::now().date_naive())
    }

    /// Loads the doctor list, and the profile when someone is signed in.
    /// Failures become notifications; the form stays usable.
    pub async fn initialize(&mut self) {
        let store = Arc::clone(&self.store);
        let user_id = self.session.as_ref().map(|s| s.user_id().to_string());

        let doctors = store.list_doctors(DoctorColumns::Summary);
        let profile = async {
            match user_id.as_deref() {
                Some(id) => Some(store.get_profile(id).await),
                None => None,
            }
        };
        let (doctors, profile) = futures::join!(doctors, profile);

        match doctors {
            Ok(doctors) => {
                debug!("Loaded {} doctors for booking form", doctors.len());
                self.doctors = doctors;
            }
            Err(e) => {
                warn!("Failed to load doctors: {}", e);
                self.notifications.push(Notification::error("Error loading doctors", e.message));
            }
        }

        match profile {
            Some(Ok(profile)) => self.profile = profile,
            Some(Err(e)) => {
                warn!("Failed to load profile: {}", e);
                self.notifications.push(Notification::error("Error loading profile", e.message));
            }
            None => self.profile = None,
        }
    }

    /// Replaces the session, reloading only when the signed-in user changed.
    pub async fn set_session(&mut self, session: Option<Session>) {
        let previous = self.session.as_ref().map(|s| s.user_id().to_string());
        let next = session.as_ref().map(|s| s.user_id().to_string());
        self.session = session;

        if previous != next {
            debug!("Signed-in user changed ({:?} -> {:?}), reloading booking form", previous, next);
            self.initialize().await;
        }
    }

    pub fn select_doctor(&mut self, doctor_id: impl Into<String>) {
        self.fields.doctor_id = doctor_id.into();
    }

    /// Rejects dates before the form's minimum; the previous value is kept.
    /// An empty value clears the field.
    pub fn set_date(&mut self, value: &str) -> Result<(), FormError> {
        if !value.is_empty() {
            self.parse_date(value)?;
        }
        self.fields.date = value.to_string();
        Ok(())
    }

    pub fn set_time(&mut self, value: impl Into<String>) {
        self.fields.time = value.into();
    }

    pub fn set_reason(&mut self, value: impl Into<String>) {
        self.fields.reason = value.into();
    }

    /// Applies a submitted form body field by field.
    pub fn fill(&mut self, form: BookAppointmentForm) -> Result<(), FormError> {
        self.select_doctor(form.doctor_id);
        self.set_date(&form.appointment_date)?;
        self.set_time(form.appointment_time);
        self.set_reason(form.reason_for_visit);
        Ok(())
    }

    fn parse_date(&self, value: &str) -> Result<NaiveDate, FormError> {
        let date = NaiveDate::parse_from_str(value, DATE_FORMAT)
            .map_err(|_| FormError::InvalidDate(value.to_string()))?;
        if date < self.min_date {
            return Err(FormError::DateBeforeMinimum { min: self.min_date });
        }
        Ok(date)
    }

    /// Input constraints checked before anything is sent: doctor, date and
    /// time are required, the reason is optional.
    pub fn validate(&self) -> Result<(NaiveDate, String), FormError> {
        if self.fields.doctor_id.trim().is_empty() {
            return Err(FormError::Required("Doctor"));
        }
        if self.fields.date.is_empty() {
            return Err(FormError::Required("Preferred date"));
        }
        let date = self.parse_date(&self.fields.date)?;

        // The time goes out exactly as the picker produced it.
        let time = &self.fields.time;
        if time.trim().is_empty() {
            return Err(FormError::Required("Preferred time"));
        }
        if NaiveTime::parse_from_str(time, "%H:%M").is_err()
            && NaiveTime::parse_from_str(time, "%H:%M:%S").is_err()
        {
            return Err(FormError::InvalidTime(time.clone()));
        }

        Ok((date, time.clone()))
    }

    /// Sends the booking. On failure every field keeps what the user typed;
    /// on success the fields clear and the confirmation dialog opens.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let user_id = match &self.session {
            Some(session) => session.user_id().to_string(),
            None => {
                debug!("Ignoring booking submit without a signed-in user");
                return SubmitOutcome::NotSignedIn;
            }
        };

        if self.submitting {
            return SubmitOutcome::AlreadySubmitting;
        }

        let (date, time) = match self.validate() {
            Ok(valid) => valid,
            Err(e) => return SubmitOutcome::Invalid(e.to_string()),
        };

        let payload = NewAppointment {
            user_id,
            doctor_id: self.fields.doctor_id.clone(),
            appointment_date: date,
            appointment_time: time,
            reason_for_visit: self.fields.reason.clone(),
        };

        self.submitting = true;
        let result = self.store.insert_appointment(payload).await;
        self.submitting = false;

        match result {
            Ok(()) => {
                info!("Appointment booked with doctor {} on {}", self.fields.doctor_id, date);
                self.show_success = true;
                self.fields = BookingFields::default();
                SubmitOutcome::Booked
            }
            Err(e) => {
                warn!("Booking failed: {}", e);
                self.notifications.push(Notification::error("Booking Failed", e.message.clone()));
                SubmitOutcome::Failed(e.message)
            }
        }
    }

    pub fn close_success_dialog(&mut self) {
        self.show_success = false;
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn fields(&self) -> &BookingFields {
        &self.fields
    }

    pub fn min_date(&self) -> NaiveDate {
        self.min_date
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_success_visible(&self) -> bool {
        self.show_success
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        mem::take(&mut self.notifications)
    }

    /// Renders the current state, handing over queued notifications.
    pub fn view(&mut self) -> BookingFormView {
        let email = self.session
            .as_ref()
            .and_then(|s| s.user.email.clone())
            .unwrap_or_default();
        let patient_name = self.profile
            .as_ref()
            .and_then(|profile| profile.full_name.clone())
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| email.clone());

        BookingFormView {
            patient_name,
            patient_email: email,
            doctors: self.doctors
                .iter()
                .map(|doctor| DoctorOption {
                    id: doctor.id.to_string(),
                    label: format!("{} - {}", doctor.name, doctor.specialty),
                })
                .collect(),
            fields: self.fields.clone(),
            min_date: self.min_date,
            submitting: self.submitting,
            submit_label: if self.submitting { SUBMITTING_LABEL } else { SUBMIT_LABEL },
            success_dialog: self.show_success.then_some(SuccessDialog {
                title: SUCCESS_TITLE,
                message: SUCCESS_MESSAGE,
            }),
            notifications: self.take_notifications(),
        }
    }
}
