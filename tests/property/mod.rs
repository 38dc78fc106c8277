// tests/property/mod.rs

//! Property-based tests for SpinelJSON
//!
//! These tests use property-based testing to verify invariants and properties
//! that should always hold, regardless of input values.

pub mod mutation_test;
pub mod roundtrip_test;
pub mod strategies;
