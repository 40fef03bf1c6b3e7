use std::mem;
use std::sync::Arc;

use tracing::{debug, warn};

use shared_database::ClinicStore;
use shared_models::notification::Notification;
use shared_models::screen::Listing;

use crate::models::{
    ServiceCard, ServicesView, NO_SERVICES_MESSAGE, NO_SERVICES_TITLE, SERVICE_PLACEHOLDERS,
};

pub struct ServiceCatalogController {
    store: Arc<dyn ClinicStore>,
    services: Listing<ServiceCard>,
    notifications: Vec<Notification>,
}

impl ServiceCatalogController {
    pub fn new(store: Arc<dyn ClinicStore>) -> Self {
        Self {
            store,
            services: Listing::loading(SERVICE_PLACEHOLDERS),
            notifications: Vec::new(),
        }
    }

    pub async fn load(&mut self) {
        let services = match self.store.list_services().await {
            Ok(services) => services,
            Err(e) => {
                warn!("Failed to load services: {}", e);
                self.notifications.push(Notification::error("Error loading services", e.message));
                Vec::new()
            }
        };
        debug!("Loaded {} services", services.len());

        let cards: Vec<ServiceCard> = services
            .into_iter()
            .map(|service| ServiceCard {
                id: service.id.to_string(),
                name: service.name,
                description: service.description,
            })
            .collect();
        self.services = Listing::from_items(cards, NO_SERVICES_TITLE, NO_SERVICES_MESSAGE);
    }

    pub fn services(&self) -> &Listing<ServiceCard> {
        &self.services
    }

    pub fn view(&mut self) -> ServicesView {
        ServicesView {
            services: self.services.clone(),
            notifications: mem::take(&mut self.notifications),
        }
    }
}
