//! Business services.

pub mod token;
