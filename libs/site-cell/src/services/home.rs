use std::sync::Arc;

use tracing::debug;

use appointment_cell::services::BookingFormController;
use shared_database::ClinicStore;
use shared_models::auth::Session;
use shared_models::screen::{BookAction, LOGIN_PATH, REGISTER_PATH};

use crate::models::{
    AppointmentSection, Hero, HomePage, FEATURES, HERO_CTA, HERO_SUBTITLE, HERO_TITLE,
    SIGN_IN_PROMPT,
};

/// Marketing landing page. Signed-in visitors get the booking form inline;
/// everyone else gets a sign-in prompt in its place.
pub struct HomePageController {
    store: Arc<dyn ClinicStore>,
    session: Option<Session>,
}

impl HomePageController {
    pub fn new(store: Arc<dyn ClinicStore>, session: Option<Session>) -> Self {
        Self { store, session }
    }

    pub async fn render(self) -> HomePage {
        let signed_in = self.session.is_some();

        let appointments = if signed_in {
            let mut form = BookingFormController::mount(self.store, self.session);
            form.initialize().await;
            AppointmentSection::BookingForm { form: form.view() }
        } else {
            debug!("Home page rendered for anonymous visitor");
            AppointmentSection::SignInPrompt {
                title: "Ready to Book an Appointment?",
                message: SIGN_IN_PROMPT,
                login_href: LOGIN_PATH,
                register_href: REGISTER_PATH,
            }
        };

        HomePage {
            hero: Hero {
                title: HERO_TITLE,
                subtitle: HERO_SUBTITLE,
                cta_label: HERO_CTA,
                cta: BookAction::for_visitor(signed_in),
            },
            features_title: "Why Choose Us?",
            features: FEATURES.to_vec(),
            appointments,
        }
    }
}
