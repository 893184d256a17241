//! Request authorization module
//!
//! This module handles:
//! - Extracting and verifying bearer credentials
//! - Rejecting revoked tokens
//! - Role-based authorization of verified claims

mod access_guard;
mod policy;


pub use access_guard::{authorize, AccessGuard};
pub use policy::RevocationFailurePolicy;
