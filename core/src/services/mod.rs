//! Business services containing the token lifecycle and authorization logic.

pub mod guard;
pub mod session;
pub mod token;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use guard::{authorize, AccessGuard, RevocationFailurePolicy};
pub use session::SessionIssuer;
pub use token::{KeyProvider, TokenCodec, TokenServiceConfig};
