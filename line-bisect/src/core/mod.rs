//! Deterministic, pure logic shared by the bisection core.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests.

pub mod bisector;
pub mod hint;
pub mod sequence;
pub mod types;
