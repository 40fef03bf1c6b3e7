use serde::Serialize;

use shared_models::clinic::Doctor;
use shared_models::notification::Notification;
use shared_models::screen::{BookAction, Listing};

pub const DOCTOR_PLACEHOLDERS: usize = 6;
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";
pub const NO_DOCTORS_TITLE: &str = "No Doctors Available";
pub const NO_DOCTORS_MESSAGE: &str = "Please check back later for our medical professionals.";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DoctorCard {
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub bio: Option<String>,
    pub image_url: String,
    pub book: BookAction,
}

impl DoctorCard {
    pub fn from_doctor(doctor: &Doctor, signed_in: bool) -> Self {
        let image_url = doctor.image_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(PLACEHOLDER_IMAGE)
            .to_string();

        Self {
            id: doctor.id.to_string(),
            name: doctor.name.clone(),
            specialty: doctor.specialty.clone(),
            bio: doctor.bio.clone(),
            image_url,
            book: BookAction::for_visitor(signed_in),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DoctorDirectoryView {
    pub doctors: Listing<DoctorCard>,
    pub notifications: Vec<Notification>,
}
