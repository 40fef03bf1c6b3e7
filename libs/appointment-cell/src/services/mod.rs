pub mod booking_form;
pub mod my_appointments;

pub use booking_form::BookingFormController;
pub use my_appointments::MyAppointmentsController;
