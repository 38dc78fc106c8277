// tests/integration/mod.rs

//! Integration tests for SpinelJSON
//!
//! These tests drive a real engine end-to-end through its public entry points,
//! verifying function results, edit semantics and shared-engine behavior.

pub mod cli_test;
pub mod concurrency_test;
pub mod engine_test;
pub mod fixtures;
pub mod test_helpers;
