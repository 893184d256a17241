pub mod revocation;

pub use revocation::{InMemoryRevocationStore, RevocationStore};

#[cfg(test)]
pub use revocation::MockRevocationStore;
