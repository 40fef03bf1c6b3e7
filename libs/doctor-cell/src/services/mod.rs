pub mod directory;

pub use directory::DoctorDirectoryController;
