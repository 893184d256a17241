//! Revocation store interface and the in-process backend.

pub mod r#trait;
pub mod memory;

pub use memory::InMemoryRevocationStore;
pub use r#trait::{revocation_ttl, RevocationStore, MIN_REVOCATION_TTL_SECONDS};

#[cfg(test)]
pub mod mock;
#[cfg(test)]
pub use mock::MockRevocationStore;

#[cfg(test)]
mod tests;
