use serde::{Deserialize, Serialize};

use appointment_cell::models::BookingFormView;
use shared_models::notification::Notification;
use shared_models::screen::{BookAction, Listing};

// ==============================================================================
// HOME
// ==============================================================================

pub const HERO_TITLE: &str = "Your Health, Our Priority";
pub const HERO_SUBTITLE: &str =
    "Providing exceptional healthcare services with compassion, expertise, and modern technology";
pub const HERO_CTA: &str = "Book Appointment Now";
pub const SIGN_IN_PROMPT: &str =
    "Please log in to your account to book an appointment with our expert doctors.";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Hero {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub cta_label: &'static str,
    pub cta: BookAction,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FeatureCard {
    pub title: &'static str,
    pub description: &'static str,
}

pub const FEATURES: [FeatureCard; 3] = [
    FeatureCard {
        title: "Expert Doctors",
        description: "Our team of experienced physicians and specialists are dedicated to providing the highest quality care.",
    },
    FeatureCard {
        title: "Quick Booking",
        description: "Easy online appointment booking system that saves your time and ensures you get the care you need.",
    },
    FeatureCard {
        title: "Quality Care",
        description: "State-of-the-art facilities and personalized treatment plans tailored to your unique health needs.",
    },
];

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AppointmentSection {
    BookingForm { form: BookingFormView },
    SignInPrompt {
        title: &'static str,
        message: &'static str,
        login_href: &'static str,
        register_href: &'static str,
    },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HomePage {
    pub hero: Hero,
    pub features_title: &'static str,
    pub features: Vec<FeatureCard>,
    pub appointments: AppointmentSection,
}

// ==============================================================================
// SERVICES
// ==============================================================================

pub const SERVICE_PLACEHOLDERS: usize = 6;
pub const NO_SERVICES_TITLE: &str = "No Services Available";
pub const NO_SERVICES_MESSAGE: &str = "Please check back later for our medical services.";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ServiceCard {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ServicesView {
    pub services: Listing<ServiceCard>,
    pub notifications: Vec<Notification>,
}

// ==============================================================================
// CONTACT
// ==============================================================================

pub const SEND_LABEL: &str = "Send Message";
pub const SENDING_LABEL: &str = "Sending...";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OfficeHours {
    pub days: &'static str,
    pub hours: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ContactInfo {
    pub address: [&'static str; 3],
    pub phone: &'static str,
    pub phone_note: &'static str,
    pub email: &'static str,
    pub office_hours: [OfficeHours; 3],
    pub emergency_note: &'static str,
}

pub const CONTACT_INFO: ContactInfo = ContactInfo {
    address: ["123 Healthcare Avenue", "Medical District", "City, State 12345"],
    phone: "+1 (234) 567-8900",
    phone_note: "Available 24/7 for emergencies",
    email: "info@healthcareplus.com",
    office_hours: [
        OfficeHours { days: "Monday - Friday", hours: "8:00 AM - 6:00 PM" },
        OfficeHours { days: "Saturday", hours: "9:00 AM - 4:00 PM" },
        OfficeHours { days: "Sunday", hours: "10:00 AM - 2:00 PM" },
    ],
    emergency_note: "Emergency services available 24/7",
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFields {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl ContactFields {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.subject.is_empty() && self.message.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", content = "detail", rename_all = "snake_case")]
pub enum ContactOutcome {
    AlreadySending,
    Invalid(String),
    Sent,
    Failed(String),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ContactFormView {
    pub fields: ContactFields,
    pub sending: bool,
    pub submit_label: &'static str,
    pub notifications: Vec<Notification>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ContactPage {
    pub info: ContactInfo,
    pub form: ContactFormView,
}
