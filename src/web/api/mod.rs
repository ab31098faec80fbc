pub mod error;
pub mod info;
pub mod locations;
pub mod status;
