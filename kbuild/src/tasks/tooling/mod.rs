pub mod doctor;
pub mod env;
