//! Domain layer containing business entities and value objects.

pub mod entities;
pub mod value_objects;

// Re-export commonly used domain types
pub use entities::{
    Claims, Identity, IssuedToken, Role, RoleSet, TokenKind, TokenPair,
    ACCESS_TOKEN_EXPIRY_MINUTES, REFRESH_TOKEN_EXPIRY_DAYS,
};
pub use value_objects::{AuthResponse, LogoutResponse, TOKEN_TYPE_BEARER};
