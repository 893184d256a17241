pub mod auth;

pub use auth::{MeResponse, RefreshTokenRequest};
