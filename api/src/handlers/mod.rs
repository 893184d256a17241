//! Request handlers shared across routes

pub mod error;

pub use error::{handle_domain_error, status_for, ApiError};
