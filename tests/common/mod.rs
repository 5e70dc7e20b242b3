//! Shared test support.

pub mod mocks;
