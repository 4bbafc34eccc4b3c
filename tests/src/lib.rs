//! Shared fixtures for the augbls integration tests
pub mod vectors;
