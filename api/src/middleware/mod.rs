pub mod auth;
pub mod role;

pub use auth::{AuthContext, Authenticator, BearerAuth};
pub use role::RequireRole;
