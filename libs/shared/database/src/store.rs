use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Method,
};
use thiserror::Error;
use tracing::debug;

use shared_config::AppConfig;
use shared_models::auth::Session;
use shared_models::clinic::{
    AppointmentRecord, ContactMessage, Doctor, DoctorColumns, NewAppointment, Profile, Service,
};

use crate::supabase::SupabaseClient;

/// Failure reported by the remote data service. The message is shown to the
/// user as-is.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct StoreError {
    pub message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl From<anyhow::Error> for StoreError {
    fn from(err: anyhow::Error) -> Self {
        StoreError::new(err.to_string())
    }
}

/// The remote collections the portal screens read from and write to.
#[async_trait]
pub trait ClinicStore: Send + Sync {
    /// Doctors ordered by name ascending.
    async fn list_doctors(&self, columns: DoctorColumns) -> Result<Vec<Doctor>, StoreError>;

    /// Profile of `user_id`; `None` when the user has no profile row.
    async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, StoreError>;

    /// Services ordered by name ascending.
    async fn list_services(&self) -> Result<Vec<Service>, StoreError>;

    /// The user's appointments with the joined doctor, newest date first.
    async fn list_appointments(&self, user_id: &str) -> Result<Vec<AppointmentRecord>, StoreError>;

    async fn insert_appointment(&self, appointment: NewAppointment) -> Result<(), StoreError>;

    async fn insert_message(&self, message: ContactMessage) -> Result<(), StoreError>;
}

/// `ClinicStore` over Supabase's PostgREST endpoint.
pub struct SupabaseStore {
    supabase: SupabaseClient,
    access_token: Option<String>,
}

impl SupabaseStore {
    pub fn new(config: &AppConfig, session: Option<&Session>) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            access_token: session.map(|s| s.access_token.clone()),
        }
    }

    fn token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    fn minimal_return() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static("return=minimal"));
        headers
    }
}

#[async_trait]
impl ClinicStore for SupabaseStore {
    async fn list_doctors(&self, columns: DoctorColumns) -> Result<Vec<Doctor>, StoreError> {
        let path = format!(
            "/rest/v1/doctors?select={}&order=name.asc",
            columns.select_clause()
        );
        debug!("Fetching doctors ({:?})", columns);

        let doctors: Vec<Doctor> = self.supabase.request(
            Method::GET,
            &path,
            self.token(),
            None,
        ).await?;

        Ok(doctors)
    }

    async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, StoreError> {
        let path = format!(
            "/rest/v1/profiles?select=full_name&user_id=eq.{}&limit=1",
            urlencoding::encode(user_id)
        );
        debug!("Fetching profile for user {}", user_id);

        let rows: Vec<Profile> = self.supabase.request(
            Method::GET,
            &path,
            self.token(),
            None,
        ).await?;

        Ok(rows.into_iter().next())
    }

    async fn list_services(&self) -> Result<Vec<Service>, StoreError> {
        debug!("Fetching services");

        let services: Vec<Service> = self.supabase.request(
            Method::GET,
            "/rest/v1/services?select=*&order=name.asc",
            self.token(),
            None,
        ).await?;

        Ok(services)
    }

    async fn list_appointments(&self, user_id: &str) -> Result<Vec<AppointmentRecord>, StoreError> {
        let path = format!(
            "/rest/v1/appointments?select=*,doctors(name,specialty)&user_id=eq.{}&order=appointment_date.desc",
            urlencoding::encode(user_id)
        );
        debug!("Fetching appointments for user {}", user_id);

        let appointments: Vec<AppointmentRecord> = self.supabase.request(
            Method::GET,
            &path,
            self.token(),
            None,
        ).await?;

        Ok(appointments)
    }

    async fn insert_appointment(&self, appointment: NewAppointment) -> Result<(), StoreError> {
        debug!("Inserting appointment for user {} with doctor {}",
               appointment.user_id, appointment.doctor_id);

        let body = serde_json::to_value(&appointment)
            .map_err(|e| StoreError::new(e.to_string()))?;

        self.supabase.execute(
            Method::POST,
            "/rest/v1/appointments",
            self.token(),
            Some(body),
            Some(Self::minimal_return()),
        ).await?;

        Ok(())
    }

    async fn insert_message(&self, message: ContactMessage) -> Result<(), StoreError> {
        debug!("Inserting contact message from {}", message.email);

        let body = serde_json::to_value(&message)
            .map_err(|e| StoreError::new(e.to_string()))?;

        self.supabase.execute(
            Method::POST,
            "/rest/v1/messages",
            self.token(),
            Some(body),
            Some(Self::minimal_return()),
        ).await?;

        Ok(())
    }
}
