use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shared_models::clinic::AppointmentStatus;
use shared_models::notification::Notification;
use shared_models::screen::Listing;

pub const SUBMIT_LABEL: &str = "Book Appointment";
pub const SUBMITTING_LABEL: &str = "Booking...";
pub const SUCCESS_TITLE: &str = "Success!";
pub const SUCCESS_MESSAGE: &str =
    "Your appointment has been booked successfully. We'll contact you soon to confirm the details.";

pub const APPOINTMENT_PLACEHOLDERS: usize = 3;
pub const NO_APPOINTMENTS_TITLE: &str = "No Appointments Yet";
pub const NO_APPOINTMENTS_MESSAGE: &str =
    "You haven't booked any appointments yet. Book your first appointment to get started.";

// ==============================================================================
// BOOKING FORM
// ==============================================================================

/// The four user-entered fields, kept exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingFields {
    pub doctor_id: String,
    pub date: String,
    pub time: String,
    pub reason: String,
}

impl BookingFields {
    pub fn is_empty(&self) -> bool {
        self.doctor_id.is_empty() && self.date.is_empty() && self.time.is_empty() && self.reason.is_empty()
    }
}

/// Body of a booking submission.
#[derive(Debug, Clone, Deserialize)]
pub struct BookAppointmentForm {
    #[serde(default)]
    pub doctor_id: String,
    #[serde(default)]
    pub appointment_date: String,
    #[serde(default)]
    pub appointment_time: String,
    #[serde(default)]
    pub reason_for_visit: String,
}

/// Input constraint violations; a form that has any of these is never sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Date must be on or after {min}")]
    DateBeforeMinimum { min: NaiveDate },

    #[error("Invalid time: {0}")]
    InvalidTime(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", content = "detail", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// No signed-in user; nothing was sent.
    NotSignedIn,
    /// A submission from this form is still in flight.
    AlreadySubmitting,
    Invalid(String),
    Booked,
    Failed(String),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DoctorOption {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SuccessDialog {
    pub title: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BookingFormView {
    pub patient_name: String,
    pub patient_email: String,
    pub doctors: Vec<DoctorOption>,
    pub fields: BookingFields,
    pub min_date: NaiveDate,
    pub submitting: bool,
    pub submit_label: &'static str,
    pub success_dialog: Option<SuccessDialog>,
    pub notifications: Vec<Notification>,
}

// ==============================================================================
// MY APPOINTMENTS
// ==============================================================================

/// Badge colour family for an appointment status.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StatusTone {
    Info,
    Success,
    Danger,
    Neutral,
}

impl From<&AppointmentStatus> for StatusTone {
    fn from(status: &AppointmentStatus) -> Self {
        match status {
            AppointmentStatus::Scheduled => StatusTone::Info,
            AppointmentStatus::Completed => StatusTone::Success,
            AppointmentStatus::Cancelled => StatusTone::Danger,
            AppointmentStatus::Other(_) => StatusTone::Neutral,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AppointmentCard {
    pub id: String,
    pub doctor_name: Option<String>,
    pub specialty: Option<String>,
    pub date: NaiveDate,
    pub date_label: String,
    pub time: String,
    pub reason: Option<String>,
    pub status: String,
    pub status_tone: StatusTone,
    pub upcoming: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MyAppointmentsView {
    pub appointments: Listing<AppointmentCard>,
    pub notifications: Vec<Notification>,
}
