use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use base64::{Engine as _, engine::general_purpose};
use serde_json::json;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::{ClinicStore, StoreError};
use shared_models::auth::{Session, User};
use shared_models::clinic::{
    AppointmentRecord, AppointmentStatus, ContactMessage, Doctor, DoctorColumns, DoctorSummary,
    NewAppointment, Profile, Service,
};

pub struct TestConfig {
    pub jwt_secret: String,
    pub supabase_url: String,
    pub supabase_anon_key: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: "test-anon-key".to_string(),
        }
    }
}

impl TestConfig {
    pub fn with_supabase_url(url: impl Into<String>) -> Self {
        Self {
            supabase_url: url.into(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            supabase_url: self.supabase_url.clone(),
            supabase_anon_key: self.supabase_anon_key.clone(),
            supabase_jwt_secret: self.jwt_secret.clone(),
            port: shared_config::DEFAULT_PORT,
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct TestUser {
    pub id: String,
    pub email: String,
    pub role: String,
}

impl Default for TestUser {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: "test@example.com".to_string(),
            role: "authenticated".to_string(),
        }
    }
}

impl TestUser {
    pub fn new(email: &str, role: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            role: role.to_string(),
        }
    }

    pub fn patient(email: &str) -> Self {
        Self::new(email, "authenticated")
    }

    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            email: Some(self.email.clone()),
            role: Some(self.role.clone()),
            metadata: None,
            created_at: Some(Utc::now()),
        }
    }

    pub fn to_session(&self) -> Session {
        Session::new(self.to_user(), format!("access-token-{}", self.id))
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(user: &TestUser, secret: &str, exp_hours: Option<i64>) -> String {
        let now = Utc::now();
        let exp = now + Duration::hours(exp_hours.unwrap_or(24));

        let header = json!({
            "alg": "HS256",
            "typ": "JWT"
        });

        let payload = json!({
            "sub": user.id,
            "email": user.email,
            "role": user.role,
            "aud": "authenticated",
            "iat": now.timestamp(),
            "exp": exp.timestamp()
        });

        let header_encoded = general_purpose::URL_SAFE_NO_PAD.encode(header.to_string());
        let payload_encoded = general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string());

        let signing_input = format!("{}.{}", header_encoded, payload_encoded);

        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();
        let signature_encoded = general_purpose::URL_SAFE_NO_PAD.encode(signature);

        format!("{}.{}", signing_input, signature_encoded)
    }

    pub fn create_expired_token(user: &TestUser, secret: &str) -> String {
        Self::create_test_token(user, secret, Some(-1))
    }

    pub fn create_invalid_signature_token(user: &TestUser) -> String {
        Self::create_test_token(user, "wrong-secret", Some(24))
    }

    pub fn create_malformed_token() -> String {
        "invalid.token.format".to_string()
    }
}

/// PostgREST-shaped rows for wiremock responses.
pub struct MockSupabaseResponses;

impl MockSupabaseResponses {
    pub fn doctor_row(id: &str, name: &str, specialty: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "specialty": specialty,
            "bio": format!("{} has been practicing {} for over ten years.", name, specialty.to_lowercase()),
            "image_url": null,
            "created_at": "2024-01-01T00:00:00Z"
        })
    }

    pub fn service_row(name: &str, description: &str) -> serde_json::Value {
        json!({
            "id": Uuid::new_v4(),
            "name": name,
            "description": description,
            "created_at": "2024-01-01T00:00:00Z"
        })
    }

    pub fn appointment_row(user_id: &str, date: &str, status: &str, doctor_name: &str) -> serde_json::Value {
        json!({
            "id": Uuid::new_v4(),
            "user_id": user_id,
            "doctor_id": Uuid::new_v4(),
            "appointment_date": date,
            "appointment_time": "09:30:00",
            "reason_for_visit": "Annual checkup",
            "status": status,
            "created_at": "2024-01-01T00:00:00Z",
            "doctors": { "name": doctor_name, "specialty": "General Practice" }
        })
    }

    pub fn error_response(message: &str, code: &str) -> serde_json::Value {
        json!({
            "code": code,
            "details": null,
            "hint": null,
            "message": message
        })
    }
}

pub fn doctor(name: &str, specialty: &str) -> Doctor {
    Doctor {
        id: Uuid::new_v4(),
        name: name.to_string(),
        specialty: specialty.to_string(),
        bio: None,
        image_url: None,
    }
}

pub fn appointment(date: NaiveDate, status: AppointmentStatus, doctor_name: &str) -> AppointmentRecord {
    AppointmentRecord {
        id: Uuid::new_v4(),
        appointment_date: date,
        appointment_time: "09:30:00".to_string(),
        reason_for_visit: Some("Annual checkup".to_string()),
        status,
        doctors: Some(DoctorSummary {
            name: doctor_name.to_string(),
            specialty: "General Practice".to_string(),
        }),
    }
}

/// Every store call a controller made, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    ListDoctors(DoctorColumns),
    GetProfile(String),
    ListServices,
    ListAppointments(String),
    InsertAppointment(NewAppointment),
    InsertMessage(ContactMessage),
}

#[derive(Default)]
struct StoreData {
    doctors: Vec<Doctor>,
    profile: Option<Profile>,
    services: Vec<Service>,
    appointments: Vec<AppointmentRecord>,
    doctors_error: Option<String>,
    profile_error: Option<String>,
    services_error: Option<String>,
    appointments_error: Option<String>,
    insert_error: Option<String>,
    calls: Vec<StoreCall>,
}

/// In-memory [`ClinicStore`] that records calls and can be told to fail.
#[derive(Default, Clone)]
pub struct RecordingStore {
    data: Arc<Mutex<StoreData>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_doctors(self, doctors: Vec<Doctor>) -> Self {
        self.data.lock().unwrap().doctors = doctors;
        self
    }

    pub fn with_profile(self, full_name: &str) -> Self {
        self.data.lock().unwrap().profile = Some(Profile { full_name: Some(full_name.to_string()) });
        self
    }

    pub fn with_services(self, services: Vec<Service>) -> Self {
        self.data.lock().unwrap().services = services;
        self
    }

    pub fn with_appointments(self, appointments: Vec<AppointmentRecord>) -> Self {
        self.data.lock().unwrap().appointments = appointments;
        self
    }

    pub fn failing_doctors(self, message: &str) -> Self {
        self.data.lock().unwrap().doctors_error = Some(message.to_string());
        self
    }

    pub fn failing_profile(self, message: &str) -> Self {
        self.data.lock().unwrap().profile_error = Some(message.to_string());
        self
    }

    pub fn failing_services(self, message: &str) -> Self {
        self.data.lock().unwrap().services_error = Some(message.to_string());
        self
    }

    pub fn failing_appointments(self, message: &str) -> Self {
        self.data.lock().unwrap().appointments_error = Some(message.to_string());
        self
    }

    /// Makes every insert fail until [`RecordingStore::accept_inserts`].
    pub fn failing_inserts(self, message: &str) -> Self {
        self.data.lock().unwrap().insert_error = Some(message.to_string());
        self
    }

    pub fn accept_inserts(&self) {
        self.data.lock().unwrap().insert_error = None;
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.data.lock().unwrap().calls.clone()
    }

    pub fn inserted_appointments(&self) -> Vec<NewAppointment> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                StoreCall::InsertAppointment(appointment) => Some(appointment),
                _ => None,
            })
            .collect()
    }

    pub fn inserted_messages(&self) -> Vec<ContactMessage> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                StoreCall::InsertMessage(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: StoreCall) -> std::sync::MutexGuard<'_, StoreData> {
        let mut data = self.data.lock().unwrap();
        data.calls.push(call);
        data
    }
}

fn fail_with(error: &Option<String>) -> Result<(), StoreError> {
    match error {
        Some(message) => Err(StoreError::new(message.clone())),
        None => Ok(()),
    }
}

#[async_trait]
impl ClinicStore for RecordingStore {
    async fn list_doctors(&self, columns: DoctorColumns) -> Result<Vec<Doctor>, StoreError> {
        let data = self.record(StoreCall::ListDoctors(columns));
        fail_with(&data.doctors_error)?;
        Ok(data.doctors.clone())
    }

    async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, StoreError> {
        let data = self.record(StoreCall::GetProfile(user_id.to_string()));
        fail_with(&data.profile_error)?;
        Ok(data.profile.clone())
    }

    async fn list_services(&self) -> Result<Vec<Service>, StoreError> {
        let data = self.record(StoreCall::ListServices);
        fail_with(&data.services_error)?;
        Ok(data.services.clone())
    }

    async fn list_appointments(&self, user_id: &str) -> Result<Vec<AppointmentRecord>, StoreError> {
        let data = self.record(StoreCall::ListAppointments(user_id.to_string()));
        fail_with(&data.appointments_error)?;
        Ok(data.appointments.clone())
    }

    async fn insert_appointment(&self, appointment: NewAppointment) -> Result<(), StoreError> {
        let data = self.record(StoreCall::InsertAppointment(appointment));
        fail_with(&data.insert_error)
    }

    async fn insert_message(&self, message: ContactMessage) -> Result<(), StoreError> {
        let data = self.record(StoreCall::InsertMessage(message));
        fail_with(&data.insert_error)
    }
}
