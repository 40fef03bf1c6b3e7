pub mod catalog;
pub mod contact;
pub mod home;

pub use catalog::ServiceCatalogController;
pub use contact::ContactFormController;
pub use home::HomePageController;
