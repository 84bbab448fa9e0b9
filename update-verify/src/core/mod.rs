//! Deterministic, pure logic for update verify configs.
//!
//! Core modules are free of I/O side effects. They operate on in-memory data
//! and return deterministic outputs suitable for tests.

pub mod chunk;
pub mod config;
pub mod grammar;
pub mod release;
