pub mod explorer;
pub mod focus;
pub mod home;
pub mod not_found;
