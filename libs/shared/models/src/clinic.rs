use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==============================================================================
// READ MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Doctor {
    pub id: Uuid,
    pub name: String,
    pub specialty: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Which doctor columns a screen asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoctorColumns {
    /// `id, name, specialty` for pickers.
    Summary,
    /// Every column, for the directory.
    All,
}

impl DoctorColumns {
    pub fn select_clause(&self) -> &'static str {
        match self {
            DoctorColumns::Summary => "id,name,specialty",
            DoctorColumns::All => "*",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DoctorSummary {
    pub name: String,
    pub specialty: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppointmentRecord {
    pub id: Uuid,
    pub appointment_date: NaiveDate,
    pub appointment_time: String,
    #[serde(default)]
    pub reason_for_visit: Option<String>,
    pub status: AppointmentStatus,
    /// Joined row from `doctors`; absent when the doctor was removed.
    #[serde(default)]
    pub doctors: Option<DoctorSummary>,
}

/// Status is owned by the backend; unknown values are carried through as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
    Other(String),
}

impl From<String> for AppointmentStatus {
    fn from(value: String) -> Self {
        match value.to_lowercase().as_str() {
            "scheduled" => AppointmentStatus::Scheduled,
            "completed" => AppointmentStatus::Completed,
            "cancelled" => AppointmentStatus::Cancelled,
            _ => AppointmentStatus::Other(value),
        }
    }
}

impl From<AppointmentStatus> for String {
    fn from(status: AppointmentStatus) -> Self {
        status.to_string()
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::Other(raw) => write!(f, "{}", raw),
        }
    }
}

// ==============================================================================
// WRITE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewAppointment {
    pub user_id: String,
    pub doctor_id: String,
    pub appointment_date: NaiveDate,
    pub appointment_time: String,
    pub reason_for_visit: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}
