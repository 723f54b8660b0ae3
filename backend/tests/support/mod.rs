//! Shared helpers for integration tests.

pub mod stub_http;
