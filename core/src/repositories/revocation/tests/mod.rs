//! Unit tests for revocation stores

mod memory_tests;
