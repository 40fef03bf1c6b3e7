use std::mem;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::{debug, info, warn};

use shared_database::ClinicStore;
use shared_models::clinic::ContactMessage;
use shared_models::notification::Notification;

use crate::models::{
    ContactError, ContactFields, ContactFormView, ContactOutcome, SENDING_LABEL, SEND_LABEL,
};

pub const SENT_TITLE: &str = "Message Sent!";
pub const SENT_MESSAGE: &str = "Thank you for contacting us. We'll get back to you soon.";

/// Contact form; works for anonymous visitors.
pub struct ContactFormController {
    store: Arc<dyn ClinicStore>,
    fields: ContactFields,
    sending: bool,
    notifications: Vec<Notification>,
}

impl ContactFormController {
    pub fn new(store: Arc<dyn ClinicStore>) -> Self {
        Self {
            store,
            fields: ContactFields::default(),
            sending: false,
            notifications: Vec::new(),
        }
    }

    pub fn fill(&mut self, fields: ContactFields) {
        self.fields = fields;
    }

    pub fn fields(&self) -> &ContactFields {
        &self.fields
    }

    /// Name, email and message are required; the subject is optional.
    pub fn validate(&self) -> Result<ContactMessage, ContactError> {
        let name = self.fields.name.trim();
        if name.is_empty() {
            return Err(ContactError::Required("Name"));
        }

        let email = self.fields.email.trim();
        if email.is_empty() {
            return Err(ContactError::Required("Email"));
        }
        if !looks_like_email(email) {
            return Err(ContactError::InvalidEmail(email.to_string()));
        }

        if self.fields.message.trim().is_empty() {
            return Err(ContactError::Required("Message"));
        }

        Ok(ContactMessage {
            name: name.to_string(),
            email: email.to_string(),
            subject: self.fields.subject.clone(),
            message: self.fields.message.clone(),
        })
    }

    pub async fn submit(&mut self) -> ContactOutcome {
        if self.sending {
            return ContactOutcome::AlreadySending;
        }

        let message = match self.validate() {
            Ok(message) => message,
            Err(e) => {
                debug!("Contact form rejected: {}", e);
                return ContactOutcome::Invalid(e.to_string());
            }
        };

        self.sending = true;
        let result = self.store.insert_message(message).await;
        self.sending = false;

        match result {
            Ok(()) => {
                info!("Contact message received");
                self.notifications.push(Notification::info(SENT_TITLE, SENT_MESSAGE));
                self.fields = ContactFields::default();
                ContactOutcome::Sent
            }
            Err(e) => {
                warn!("Failed to send contact message: {}", e);
                self.notifications.push(Notification::error("Error sending message", e.message.clone()));
                ContactOutcome::Failed(e.message)
            }
        }
    }

    pub fn view(&mut self) -> ContactFormView {
        ContactFormView {
            fields: self.fields.clone(),
            sending: self.sending,
            submit_label: if self.sending { SENDING_LABEL } else { SEND_LABEL },
            notifications: mem::take(&mut self.notifications),
        }
    }
}

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9-]+(\.[a-zA-Z0-9-]+)*\.[a-zA-Z]{2,}$")
        .expect("email pattern compiles")
});

const MAX_EMAIL_LEN: usize = 254;

fn looks_like_email(value: &str) -> bool {
    value.len() <= MAX_EMAIL_LEN && EMAIL.is_match(value)
}
